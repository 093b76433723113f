//! Toast Queue
//!
//! One toast per mutation attempt: created as loading, then replaced in place
//! by the outcome.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// How long finished toasts stay on screen
pub const TOAST_DISMISS_MS: u32 = 3000;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u32,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u32 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            kind,
            message: message.into(),
        });
        self.next_id
    }

    pub fn loading(&mut self, message: impl Into<String>) -> u32 {
        self.push(ToastKind::Loading, message)
    }

    /// Replace toast `id` in place; a dismissed toast is re-added at the end
    pub fn resolve(&mut self, id: u32, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) => {
                toast.kind = kind;
                toast.message = message;
            }
            None => self.toasts.push(Toast { id, kind, message }),
        }
    }

    pub fn dismiss(&mut self, id: u32) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}
