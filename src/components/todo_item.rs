//! Todo Item Component
//!
//! One row: checkbox, text, Edit/Delete, and an inline editor.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::actions::{self, Action};
use crate::context::AppContext;
use crate::draft::EditDraft;
use crate::models::Todo;
use crate::store::{is_item_done, is_item_pending, mutations_enabled, use_app_store};

#[component]
pub fn TodoItem(todo: Todo) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let draft = RwSignal::new(EditDraft::default());
    let id = StoredValue::new(todo.id.clone());
    let text = todo.text.clone();

    let done = move || id.with_value(|id| is_item_done(&store, id));
    let pending = move || id.with_value(|id| is_item_pending(&store, id));
    let disabled = move || pending() || !mutations_enabled(&store);

    // The checkbox only ever shows the projection; a click asks the ledger
    let toggle = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        actions::run(store, ctx, Action::Toggle { id: id.get_value() });
    };
    let delete = move |_| {
        actions::run(store, ctx, Action::Delete { id: id.get_value() });
    };
    let start_edit = {
        let text = text.clone();
        move |_| draft.update(|d| d.begin(&text))
    };
    let save = move |_| {
        let mut committed = None;
        draft.update(|d| committed = d.commit());
        if let Some(text) = committed {
            actions::run(store, ctx, Action::Update { id: id.get_value(), text });
        }
    };
    let cancel = move |_| draft.update(EditDraft::cancel);

    view! {
        <li class=move || if done() { "todo-item done" } else { "todo-item" }>
            <input type="checkbox" prop:checked=done disabled=disabled on:click=toggle />

            <Show
                when=move || draft.with(EditDraft::is_editing)
                fallback=move || view! {
                    <span class="todo-text">{text.clone()}</span>
                    <button class="secondary" disabled=disabled on:click=start_edit.clone()>
                        "Edit"
                    </button>
                    <button class="danger" disabled=disabled on:click=delete>"Delete"</button>
                }
            >
                <input
                    type="text"
                    class="edit-input"
                    prop:value=move || draft.with(|d| d.text().to_string())
                    disabled=disabled
                    on:input=move |ev| {
                        if let Some(input) = ev
                            .target()
                            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                        {
                            draft.update(|d| d.set_text(input.value()));
                        }
                    }
                />
                <button
                    disabled=move || disabled() || !draft.with(EditDraft::can_save)
                    on:click=save
                >
                    "Save"
                </button>
                <button class="secondary" disabled=disabled on:click=cancel>"Cancel"</button>
            </Show>

            <Show when=pending>
                <span class="spinner" aria-label="pending"></span>
            </Show>
        </li>
    }
}
