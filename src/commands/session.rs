//! Session Commands
//!
//! Frontend bindings for session, settings and wallet commands.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::call;
use crate::models::SessionInfo;

#[derive(Serialize)]
struct PackageArgs<'a> {
    #[serde(rename = "packageId")]
    package_id: &'a str,
}

#[derive(Serialize)]
struct NetworkArgs<'a> {
    network: &'a str,
}

pub async fn open_session() -> Result<SessionInfo, String> {
    call("open_session", JsValue::NULL).await
}

pub async fn set_package_override(package_id: &str) -> Result<(), String> {
    let js_args =
        serde_wasm_bindgen::to_value(&PackageArgs { package_id }).map_err(|e| e.to_string())?;
    call("set_package_override", js_args).await
}

pub async fn clear_package_override() -> Result<(), String> {
    call("clear_package_override", JsValue::NULL).await
}

pub async fn set_network(network: &str) -> Result<(), String> {
    let js_args =
        serde_wasm_bindgen::to_value(&NetworkArgs { network }).map_err(|e| e.to_string())?;
    call("set_network", js_args).await
}

pub async fn connect_wallet() -> Result<SessionInfo, String> {
    call("connect_wallet", JsValue::NULL).await
}

pub async fn disconnect_wallet() -> Result<SessionInfo, String> {
    call("disconnect_wallet", JsValue::NULL).await
}
