//! Frontend Models
//!
//! Data structures matching backend entities.

use serde::{Deserialize, Serialize};

/// Todo data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Object id, `0x` + 64 hex digits
    pub id: String,
    pub text: String,
    pub done: bool,
    #[serde(default)]
    pub version: u64,
}

/// What the single pending marker points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PendingTarget {
    New,
    Existing(String),
}

impl PendingTarget {
    pub fn is_item(&self, id: &str) -> bool {
        matches!(self, PendingTarget::Existing(pending) if pending == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub network: String,
    pub rpc_url: String,
    pub package_id: String,
    /// `default` or `override`
    pub package_source: String,
    pub address: Option<String>,
    pub short_address: Option<String>,
    pub pending: Option<PendingTarget>,
}

impl SessionInfo {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ModuleStatus {
    Available,
    Unavailable { reason: String },
}

/// Payload of the `mutation-phase` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseReport {
    pub target: PendingTarget,
    pub kind: String,
    pub phase: String,
    pub message: String,
    #[serde(default)]
    pub digest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationOutcome {
    pub digest: String,
    pub todos: Vec<Todo>,
}

pub const NETWORKS: [&str; 2] = ["testnet", "mainnet"];

/// `0x1234...abcd`; short inputs come back unchanged
pub fn short_address(address: &str) -> String {
    if address.len() <= 12
        || !address.is_char_boundary(6)
        || !address.is_char_boundary(address.len() - 4)
    {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address() {
        let address = format!("0x1234{}abcd", "0".repeat(56));
        assert_eq!(short_address(&address), "0x1234...abcd");
        assert_eq!(short_address("0x12"), "0x12");
    }

    #[test]
    fn test_pending_target_matches_backend_shape() {
        let pending: PendingTarget =
            serde_json::from_str(r#"{"kind":"existing","id":"0xab"}"#).unwrap();
        assert!(pending.is_item("0xab"));
        assert!(!pending.is_item("0xcd"));

        let pending: PendingTarget = serde_json::from_str(r#"{"kind":"new"}"#).unwrap();
        assert_eq!(pending, PendingTarget::New);
    }

    #[test]
    fn test_module_status_shape() {
        let status: ModuleStatus =
            serde_json::from_str(r#"{"status":"unavailable","reason":"missing"}"#).unwrap();
        assert_eq!(status, ModuleStatus::Unavailable { reason: "missing".to_string() });
    }

    #[test]
    fn test_phase_report_shape() {
        let report: PhaseReport = serde_json::from_str(
            r#"{"target":{"kind":"new"},"kind":"create","phase":"succeeded",
                "message":"Todo created!"}"#,
        )
        .unwrap();
        assert_eq!(report.target, PendingTarget::New);
        assert_eq!(report.phase, "succeeded");
        assert_eq!(report.digest, None);
    }
}
