//! Tauri Commands for Todos
//!
//! Listing, module check and the four mutations. Mutation errors come back
//! as "<Verb> failed: <reason>".

use tauri::State;

use super::session_cmd::active;
use crate::domain::{MutationIntent, ObjectId, PendingTarget, SuiAddress, Todo};
use crate::services::{ModuleStatus, MutationOutcome};
use crate::AppState;

fn object_id(id: &str) -> Result<ObjectId, String> {
    SuiAddress::parse(id).map_err(|e| e.to_string())
}

async fn run(state: &AppState, intent: MutationIntent) -> Result<MutationOutcome, String> {
    let kind = intent.kind();
    let active = active(state).await.map_err(|e| kind.failure_message(&e))?;
    active
        .session
        .dispatch(intent)
        .await
        .map_err(|e| kind.failure_message(&e.to_string()))
}

/// Todos owned by the connected account (empty when disconnected)
#[tauri::command]
pub async fn list_todos(state: State<'_, AppState>) -> Result<Vec<Todo>, String> {
    let active = active(&state).await?;
    active.session.list_todos().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn check_module(state: State<'_, AppState>) -> Result<ModuleStatus, String> {
    let active = active(&state).await?;
    Ok(active.session.check_module().await)
}

#[tauri::command]
pub async fn pending_mutation(state: State<'_, AppState>) -> Result<Option<PendingTarget>, String> {
    Ok(active(&state).await?.session.pending())
}

#[tauri::command]
pub async fn create_todo(
    text: String,
    state: State<'_, AppState>,
) -> Result<MutationOutcome, String> {
    run(&state, MutationIntent::Create { text }).await
}

#[tauri::command]
pub async fn toggle_done(
    id: String,
    state: State<'_, AppState>,
) -> Result<MutationOutcome, String> {
    let id = object_id(&id)?;
    run(&state, MutationIntent::Toggle { id }).await
}

#[tauri::command]
pub async fn update_text(
    id: String,
    text: String,
    state: State<'_, AppState>,
) -> Result<MutationOutcome, String> {
    let id = object_id(&id)?;
    run(&state, MutationIntent::Update { id, text }).await
}

#[tauri::command]
pub async fn delete_todo(
    id: String,
    state: State<'_, AppState>,
) -> Result<MutationOutcome, String> {
    let id = object_id(&id)?;
    run(&state, MutationIntent::Delete { id }).await
}
