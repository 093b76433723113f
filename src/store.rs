//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use crate::models::{ModuleStatus, PendingTarget, SessionInfo, Todo};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TodoState {
    /// Projection of the account's todos, in ledger order
    pub todos: Vec<Todo>,
    /// Set once `open_session` returns
    pub session: Option<SessionInfo>,
    /// Result of the module check (None while it runs)
    pub module: Option<ModuleStatus>,
    /// A list fetch is in flight
    pub loading: bool,
    /// Last list fetch error, shown as a warning
    pub load_error: Option<String>,
    /// The single in-flight mutation, if any
    pub pending: Option<PendingTarget>,
}

/// Type alias for the store
pub type AppStore = Store<TodoState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn is_connected(store: &AppStore) -> bool {
    store.session().with(|s| s.as_ref().is_some_and(SessionInfo::is_connected))
}

pub fn module_available(store: &AppStore) -> bool {
    store.module().with(|m| matches!(m, Some(ModuleStatus::Available)))
}

/// Mutations need an account and a usable module
pub fn mutations_enabled(store: &AppStore) -> bool {
    is_connected(store) && module_available(store)
}

pub fn is_item_pending(store: &AppStore, id: &str) -> bool {
    store.pending().with(|p| p.as_ref().is_some_and(|p| p.is_item(id)))
}

/// `done` as the current projection has it; false once the item is gone
pub fn is_item_done(store: &AppStore, id: &str) -> bool {
    store.todos().with(|todos| todos.iter().any(|t| t.id == id && t.done))
}

/// Mark `target` as the in-flight mutation.
///
/// Returns false, and leaves the marker alone, if another one is pending.
pub fn claim_pending(store: &AppStore, target: PendingTarget) -> bool {
    let mut claimed = false;
    store.pending().update(|pending| {
        if pending.is_none() {
            *pending = Some(target);
            claimed = true;
        }
    });
    claimed
}

/// Clear the marker, but only if it still belongs to `target`
pub fn release_pending(store: &AppStore, target: &PendingTarget) {
    if store.pending().with_untracked(|p| p.as_ref() == Some(target)) {
        store.pending().set(None);
    }
}
