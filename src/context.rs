//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::toast::{ToastKind, ToastQueue, TOAST_DISMISS_MS};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload todos from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload todos from backend - write
    set_reload_trigger: WriteSignal<u32>,
    pub toasts: RwSignal<ToastQueue>,
}

impl AppContext {
    pub fn new(reload_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            toasts: RwSignal::new(ToastQueue::default()),
        }
    }

    /// Trigger a reload of todos
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn toast_loading(&self, message: &str) -> u32 {
        let mut id = 0;
        self.toasts.update(|q| id = q.loading(message));
        id
    }

    /// Replace toast `id` with the outcome and dismiss it after a while
    pub fn toast_finish(&self, id: u32, kind: ToastKind, message: &str) {
        self.toasts.update(|q| q.resolve(id, kind, message));
        let toasts = self.toasts;
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DISMISS_MS).await;
            toasts.update(|q| q.dismiss(id));
        });
    }

    pub fn toast_error(&self, message: &str) {
        let id = self.toast_loading(message);
        self.toast_finish(id, ToastKind::Error, message);
    }
}
