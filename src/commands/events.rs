//! Backend Events
//!
//! Subscriptions to events the backend emits.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use super::listen;
use crate::models::PhaseReport;

pub const MUTATION_PHASE_EVENT: &str = "mutation-phase";

#[derive(Deserialize)]
struct EventEnvelope<T> {
    payload: T,
}

/// Call `on_report` for every mutation phase change, for the life of the page
pub async fn listen_mutation_phases(mut on_report: impl FnMut(PhaseReport) + 'static) {
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        match serde_wasm_bindgen::from_value::<EventEnvelope<PhaseReport>>(event) {
            Ok(envelope) => on_report(envelope.payload),
            Err(e) => {
                let line = format!("[EVENTS] Bad {} payload: {}", MUTATION_PHASE_EVENT, e);
                web_sys::console::log_1(&line.into());
            }
        }
    });
    let _ = listen(MUTATION_PHASE_EVENT, &handler).await;
    // The page never unsubscribes
    handler.forget();
}
