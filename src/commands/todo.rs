//! Todo Commands
//!
//! Frontend bindings for listing and mutating todos.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::call;
use crate::models::{ModuleStatus, MutationOutcome, Todo};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct TextArgs<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct UpdateArgs<'a> {
    id: &'a str,
    text: &'a str,
}

// ========================
// Commands
// ========================

pub async fn list_todos() -> Result<Vec<Todo>, String> {
    call("list_todos", JsValue::NULL).await
}

pub async fn check_module() -> Result<ModuleStatus, String> {
    call("check_module", JsValue::NULL).await
}

pub async fn create_todo(text: &str) -> Result<MutationOutcome, String> {
    let js_args = serde_wasm_bindgen::to_value(&TextArgs { text }).map_err(|e| e.to_string())?;
    call("create_todo", js_args).await
}

pub async fn toggle_done(id: &str) -> Result<MutationOutcome, String> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(|e| e.to_string())?;
    call("toggle_done", js_args).await
}

pub async fn update_text(id: &str, text: &str) -> Result<MutationOutcome, String> {
    let js_args =
        serde_wasm_bindgen::to_value(&UpdateArgs { id, text }).map_err(|e| e.to_string())?;
    call("update_text", js_args).await
}

pub async fn delete_todo(id: &str) -> Result<MutationOutcome, String> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(|e| e.to_string())?;
    call("delete_todo", js_args).await
}
