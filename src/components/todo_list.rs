//! Todo List Component
//!
//! Loading, empty and populated states of the projection.

use leptos::prelude::*;

use crate::components::TodoItem;
use crate::store::{use_app_store, TodoStateStoreFields};

#[component]
pub fn TodoList() -> impl IntoView {
    let store = use_app_store();

    view! {
        <Show when=move || store.load_error().get().is_some()>
            <div class="warning">
                "Could not load todos: " {move || store.load_error().get().unwrap_or_default()}
            </div>
        </Show>
        {move || {
            let todos = store.todos().get();
            if store.loading().get() && todos.is_empty() {
                view! { <p class="muted">"Loading todos..."</p> }.into_any()
            } else if todos.is_empty() {
                view! { <p class="empty">"No todos yet. Add your first task above."</p> }.into_any()
            } else {
                view! {
                    <ul class="todo-list">
                        <For
                            each=move || store.todos().get()
                            key=|todo| (todo.id.clone(), todo.version, todo.done, todo.text.clone())
                            children=move |todo| view! { <TodoItem todo=todo /> }
                        />
                    </ul>
                }.into_any()
            }
        }}
    }
}
