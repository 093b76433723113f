//! Sui Todo Frontend Entry Point

mod models;
mod commands;
mod context;
mod store;
mod toast;
mod draft;
mod actions;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
