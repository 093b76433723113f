//! Module Banner Component
//!
//! Persistent warning while the configured package has no usable `todo` module.

use leptos::prelude::*;

use crate::models::ModuleStatus;
use crate::store::{use_app_store, TodoStateStoreFields};

#[component]
pub fn ModuleBanner() -> impl IntoView {
    let store = use_app_store();

    let reason = move || match store.module().get() {
        Some(ModuleStatus::Unavailable { reason }) => Some(reason),
        _ => None,
    };

    view! {
        {move || reason().map(|reason| view! {
            <div class="warning banner">
                <strong>"Todo module unavailable. "</strong>
                {reason}
                <div class="muted">"Listing still works; creating and editing are disabled."</div>
            </div>
        })}
    }
}
