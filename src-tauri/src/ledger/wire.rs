//! JSON-RPC Response Shapes
//!
//! Only the fields this app reads. Object contents stay as raw JSON so the
//! projection can decide, per object, whether it is usable.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{LedgerError, LedgerResult};
use crate::domain::TransactionDigest;

/// Result of `suix_getOwnedObjects`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPage {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

/// Result of `sui_getNormalizedMoveModule`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedModule {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub exposed_functions: BTreeMap<String, serde_json::Value>,
}

/// Result of `unsafe_moveCall`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockBytes {
    /// Base64 BCS `TransactionData`
    pub tx_bytes: String,
}

/// Result of `sui_executeTransactionBlock` with `showEffects`
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteResponse {
    pub digest: String,
    #[serde(default)]
    pub effects: Option<Effects>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Effects {
    pub status: ExecutionStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionStatus {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecuteResponse {
    /// Digest of a successful execution; a `failure` status becomes an error
    pub fn into_digest(self) -> LedgerResult<TransactionDigest> {
        match self.effects {
            Some(Effects { status }) if status.status != "success" => Err(LedgerError::Execution(
                status.error.unwrap_or_else(|| status.status.clone()),
            )),
            _ => Ok(TransactionDigest::new(self.digest)),
        }
    }
}
