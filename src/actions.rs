//! Mutation Actions
//!
//! Runs one user mutation end to end on the UI side: pending marker, toast,
//! backend call, new projection.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::AppContext;
use crate::models::PendingTarget;
use crate::store::{claim_pending, release_pending, AppStore, TodoStateStoreFields};
use crate::toast::ToastKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Create { text: String },
    Toggle { id: String },
    Update { id: String, text: String },
    Delete { id: String },
}

impl Action {
    pub fn target(&self) -> PendingTarget {
        match self {
            Action::Create { .. } => PendingTarget::New,
            Action::Toggle { id } | Action::Update { id, .. } | Action::Delete { id } => {
                PendingTarget::Existing(id.clone())
            }
        }
    }

    pub fn loading_message(&self) -> &'static str {
        match self {
            Action::Create { .. } => "Creating todo...",
            Action::Toggle { .. } => "Toggling...",
            Action::Update { .. } => "Updating...",
            Action::Delete { .. } => "Deleting...",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Action::Create { .. } => "Todo created!",
            Action::Toggle { .. } | Action::Update { .. } => "Todo updated!",
            Action::Delete { .. } => "Todo deleted!",
        }
    }

    /// Shown when the action is refused because another one is in flight
    pub fn busy_message(&self) -> String {
        format!("{} failed: Another transaction is still pending", self.verb())
    }

    fn verb(&self) -> &'static str {
        match self {
            Action::Create { .. } => "Create",
            Action::Toggle { .. } => "Toggle",
            Action::Update { .. } => "Update",
            Action::Delete { .. } => "Delete",
        }
    }
}

/// Start `action` unless another mutation is pending.
///
/// The pending marker is set here and released by this action's own result.
pub fn run(store: AppStore, ctx: AppContext, action: Action) {
    let target = action.target();
    if !claim_pending(&store, target.clone()) {
        ctx.toast_error(&action.busy_message());
        return;
    }

    let toast = ctx.toast_loading(action.loading_message());
    web_sys::console::log_1(&format!("[TODOS] {:?}", action).into());

    spawn_local(async move {
        let result = match &action {
            Action::Create { text } => commands::create_todo(text).await,
            Action::Toggle { id } => commands::toggle_done(id).await,
            Action::Update { id, text } => commands::update_text(id, text).await,
            Action::Delete { id } => commands::delete_todo(id).await,
        };

        match result {
            Ok(outcome) => {
                web_sys::console::log_1(
                    &format!("[TODOS] Finalized in {}", outcome.digest).into(),
                );
                store.todos().set(outcome.todos);
                release_pending(&store, &target);
                ctx.toast_finish(toast, ToastKind::Success, action.success_message());
            }
            Err(message) => {
                web_sys::console::log_1(&format!("[TODOS] {}", message).into());
                release_pending(&store, &target);
                ctx.toast_finish(toast, ToastKind::Error, &message);
            }
        }
    });
}
