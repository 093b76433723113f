//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod session;
mod todo;
mod events;

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"])]
    async fn listen(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> JsValue;
}

/// Invoke and decode; rejected promises carry the backend's error string
async fn call<T: DeserializeOwned>(cmd: &str, args: JsValue) -> Result<T, String> {
    match invoke(cmd, args).await {
        Ok(result) => serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string()),
        Err(err) => Err(err.as_string().unwrap_or_else(|| format!("{} failed", cmd))),
    }
}

// Re-export all public items
pub use session::*;
pub use todo::*;
pub use events::*;
