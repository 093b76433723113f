//! Create Form Component
//!
//! Text input plus Add button for new todos.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::actions::{self, Action};
use crate::context::AppContext;
use crate::draft::submittable;
use crate::store::{is_connected, module_available, use_app_store, TodoStateStoreFields};

#[component]
pub fn CreateForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (new_text, set_new_text) = signal(String::new());

    let disabled = move || {
        !is_connected(&store)
            || store.loading().get()
            || !module_available(&store)
            || store.pending().get().is_some()
            || submittable(&new_text.get()).is_none()
    };

    let create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if disabled() {
            return;
        }
        let Some(text) = submittable(&new_text.get()) else {
            return;
        };
        set_new_text.set(String::new());
        actions::run(store, ctx, Action::Create { text });
    };

    view! {
        <form class="create-form" on:submit=create>
            <input
                type="text"
                placeholder="What needs to be done?"
                prop:value=move || new_text.get()
                on:input=move |ev| {
                    if let Some(input) = ev
                        .target()
                        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                    {
                        set_new_text.set(input.value());
                    }
                }
            />
            <button type="submit" disabled=disabled>"Add"</button>
        </form>
    }
}
