//! Module Availability Check
//!
//! Advisory check that the configured package really contains the `todo`
//! module and its entry functions. Never fails: any problem becomes
//! `ModuleStatus::Unavailable` and the UI degrades to read-only.

use serde::Serialize;

use crate::domain::{MutationKind, ObjectId, TODO_MODULE};
use crate::ledger::{LedgerClient, NormalizedModule};

/// Entry functions every mutation relies on
pub const REQUIRED_FUNCTIONS: [MutationKind; 4] = [
    MutationKind::Create,
    MutationKind::Toggle,
    MutationKind::Update,
    MutationKind::Delete,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ModuleStatus {
    Available,
    Unavailable { reason: String },
}

impl ModuleStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, ModuleStatus::Available)
    }
}

/// Check a fetched module for the functions the app calls
pub fn evaluate_module(module: &NormalizedModule) -> ModuleStatus {
    let missing: Vec<&str> = REQUIRED_FUNCTIONS
        .iter()
        .map(|kind| kind.function())
        .filter(|name| !module.exposed_functions.contains_key(*name))
        .collect();

    if missing.is_empty() {
        ModuleStatus::Available
    } else {
        ModuleStatus::Unavailable {
            reason: format!("module `{}` is missing {}", TODO_MODULE, missing.join(", ")),
        }
    }
}

pub async fn check_todo_module(client: &dyn LedgerClient, package: &ObjectId) -> ModuleStatus {
    match client.get_normalized_module(package, TODO_MODULE).await {
        Ok(module) => {
            let status = evaluate_module(&module);
            if let ModuleStatus::Unavailable { reason } = &status {
                log::warn!("package {}: {}", package, reason);
            }
            status
        }
        Err(e) => {
            log::warn!("package {} has no usable `{}` module: {}", package, TODO_MODULE, e);
            ModuleStatus::Unavailable {
                reason: format!(
                    "Package ID does not contain `{}` module ({}). \
                     Publish the Move package and set the new package ID.",
                    TODO_MODULE, e
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn module_with(functions: &[&str]) -> NormalizedModule {
        let mut module = NormalizedModule::default();
        for name in functions {
            module.exposed_functions.insert(name.to_string(), json!({}));
        }
        module
    }

    #[test]
    fn test_complete_module_is_available() {
        let module =
            module_with(&["create_todo", "toggle_done", "update_text", "delete_todo", "extra"]);
        assert_eq!(evaluate_module(&module), ModuleStatus::Available);
    }

    #[test]
    fn test_missing_functions_are_named() {
        let module = module_with(&["create_todo", "toggle_done"]);
        match evaluate_module(&module) {
            ModuleStatus::Unavailable { reason } => {
                assert!(reason.contains("update_text"));
                assert!(reason.contains("delete_todo"));
                assert!(!reason.contains("create_todo"));
            }
            other => panic!("expected unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_value(ModuleStatus::Available).unwrap(),
            json!({ "status": "available" })
        );
        assert_eq!(
            serde_json::to_value(ModuleStatus::Unavailable { reason: "x".into() }).unwrap(),
            json!({ "status": "unavailable", "reason": "x" })
        );
    }
}
