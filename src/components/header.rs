//! Header Component
//!
//! Title, package id with override input, network selector and wallet button.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands;
use crate::context::AppContext;
use crate::models::{short_address, NETWORKS};
use crate::store::{use_app_store, TodoStateStoreFields};

fn reload_page() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (package_input, set_package_input) = signal(String::new());

    let package_id = move || store.session().get().map(|s| s.package_id).unwrap_or_default();
    let is_override = move || {
        store.session().get().is_some_and(|s| s.package_source == "override")
    };
    let network = move || store.session().get().map(|s| s.network).unwrap_or_default();
    let address = move || store.session().get().and_then(|s| s.short_address.or(s.address));

    let set_package = move |_| {
        let value = package_input.get().trim().to_string();
        if !value.starts_with("0x") {
            ctx.toast_error("Package ID must start with 0x");
            return;
        }
        spawn_local(async move {
            match commands::set_package_override(&value).await {
                Ok(()) => reload_page(),
                Err(e) => ctx.toast_error(&e),
            }
        });
    };

    let reset_package = move |_| {
        spawn_local(async move {
            match commands::clear_package_override().await {
                Ok(()) => reload_page(),
                Err(e) => ctx.toast_error(&e),
            }
        });
    };

    let change_network = move |ev: web_sys::Event| {
        let Some(select) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        else {
            return;
        };
        let value = select.value();
        spawn_local(async move {
            match commands::set_network(&value).await {
                Ok(()) => reload_page(),
                Err(e) => ctx.toast_error(&e),
            }
        });
    };

    let toggle_wallet = move |_| {
        let connected = store.session().get().is_some_and(|s| s.is_connected());
        spawn_local(async move {
            let result = if connected {
                commands::disconnect_wallet().await
            } else {
                commands::connect_wallet().await
            };
            match result {
                Ok(info) => {
                    web_sys::console::log_1(
                        &format!("[SESSION] Account {:?}", info.address).into(),
                    );
                    store.session().set(Some(info));
                    store.todos().set(Vec::new());
                    ctx.reload();
                }
                Err(e) => ctx.toast_error(&e),
            }
        });
    };

    view! {
        <header class="app-header">
            <div class="header-title">
                <h1>"Todo Board dApp"</h1>
                <span class="package-id" title=package_id>
                    "Package: " {move || short_address(&package_id())}
                    {move || is_override().then(|| view! { <span class="badge">"override"</span> })}
                </span>
            </div>

            <div class="header-controls">
                <div class="package-override">
                    <input
                        type="text"
                        placeholder="0x... package id"
                        prop:value=move || package_input.get()
                        on:input=move |ev| {
                            if let Some(input) = ev
                                .target()
                                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                            {
                                set_package_input.set(input.value());
                            }
                        }
                    />
                    <button on:click=set_package>"Set"</button>
                    <Show when=is_override>
                        <button class="secondary" on:click=reset_package>"Reset"</button>
                    </Show>
                </div>

                <select class="network-select" on:change=change_network prop:value=network>
                    {NETWORKS.into_iter().map(|name| view! {
                        <option value=name selected=move || network() == name>{name}</option>
                    }).collect_view()}
                </select>

                <span class="address">{move || address().unwrap_or_default()}</span>
                <button class="wallet-btn" on:click=toggle_wallet>
                    {move || if address().is_some() { "Disconnect" } else { "Connect Wallet" }}
                </button>
            </div>
        </header>
    }
}
