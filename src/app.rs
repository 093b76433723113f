//! Sui Todo Frontend App
//!
//! Opens the session on mount, then keeps the projection and module status
//! in the store. The pending marker belongs to `actions::run`.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{CreateForm, Header, ModuleBanner, Toaster, TodoList};
use crate::context::AppContext;
use crate::store::{is_connected, TodoState, TodoStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(TodoState::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let ctx = AppContext::new((reload_trigger, set_reload_trigger));

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Open the session once per page load; settings changes reload the page
    spawn_local(async move {
        match commands::open_session().await {
            Ok(info) => {
                web_sys::console::log_1(
                    &format!("[SESSION] {} / {}", info.network, info.package_id).into(),
                );
                store.session().set(Some(info));
                let status = commands::check_module().await;
                match status {
                    Ok(status) => store.module().set(Some(status)),
                    Err(e) => web_sys::console::log_1(
                        &format!("[SESSION] Module check failed: {}", e).into(),
                    ),
                }
            }
            Err(e) => ctx.toast_error(&format!("Could not open session: {}", e)),
        }
    });

    // Phase progress of the in-flight mutation
    spawn_local(commands::listen_mutation_phases(move |report| {
        let line = format!("[TODOS] {} {}: {}", report.kind, report.phase, report.message);
        web_sys::console::log_1(&line.into());
    }));

    // Load todos when the session changes or on demand
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        let connected = is_connected(&store);
        if store.session().with_untracked(|s| s.is_none()) {
            return;
        }
        web_sys::console::log_1(&format!("[TODOS] Loading, trigger={}", trigger).into());
        if !connected {
            store.todos().set(Vec::new());
            return;
        }
        store.loading().set(true);
        spawn_local(async move {
            match commands::list_todos().await {
                Ok(loaded) => {
                    web_sys::console::log_1(
                        &format!("[TODOS] Loaded {} todos", loaded.len()).into(),
                    );
                    store.todos().set(loaded);
                    store.load_error().set(None);
                }
                Err(e) => store.load_error().set(Some(e)),
            }
            store.loading().set(false);
        });
    });

    view! {
        <div class="app-layout">
            <Header />
            <main class="main-content">
                <ModuleBanner />
                <Show
                    when=move || is_connected(&store)
                    fallback=|| view! { <p class="empty">"Please connect your wallet"</p> }
                >
                    <CreateForm />
                    <TodoList />
                </Show>
            </main>
            <Toaster />
        </div>
    }
}
