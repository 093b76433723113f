//! Fullnode JSON-RPC Client
//!
//! JSON-RPC 2.0 over HTTPS POST. One client per session, bound to the
//! fullnode URL of the session's network.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::wire::{ExecuteResponse, NormalizedModule, ObjectPage, TransactionBlockBytes};
use super::{LedgerClient, LedgerError, LedgerResult};
use crate::domain::{MoveCall, ObjectId, SuiAddress, TransactionDigest};

/// Timing knobs for the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcSettings {
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// Delay between `sui_getTransactionBlock` polls while waiting for finality
    pub poll_interval: Duration,
    /// Give up waiting for finality after this long
    pub finality_timeout: Duration,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(2),
            finality_timeout: Duration::from_secs(60),
        }
    }
}

pub struct SuiRpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
    settings: RpcSettings,
}

impl SuiRpcClient {
    pub fn new(url: impl Into<String>, settings: RpcSettings) -> LedgerResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
            settings,
        })
    }

    /// Issue one JSON-RPC request and decode its `result`
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> LedgerResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        log::debug!("rpc #{} {}", id, method);
        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let value: Value = response.json().await?;
        decode_rpc_response(value)
    }

    /// Let the fullnode build the transaction bytes for a Move call
    pub async fn unsafe_move_call(
        &self,
        signer: &SuiAddress,
        call: &MoveCall,
        gas_budget: u64,
    ) -> LedgerResult<TransactionBlockBytes> {
        let arguments: Vec<Value> = call.arguments.iter().map(|a| a.to_json()).collect();
        self.call(
            "unsafe_moveCall",
            json!([
                signer.to_hex(),
                call.package.to_hex(),
                call.module,
                call.function,
                [],
                arguments,
                null,
                gas_budget.to_string(),
            ]),
        )
        .await
    }

    /// Submit signed bytes and wait for local execution
    pub async fn execute_transaction_block(
        &self,
        tx_bytes: &str,
        signature: &str,
    ) -> LedgerResult<ExecuteResponse> {
        self.call(
            "sui_executeTransactionBlock",
            json!([
                tx_bytes,
                [signature],
                { "showEffects": true },
                "WaitForLocalExecution",
            ]),
        )
        .await
    }

    pub async fn get_transaction_block(&self, digest: &TransactionDigest) -> LedgerResult<Value> {
        self.call(
            "sui_getTransactionBlock",
            json!([digest.as_str(), { "showEffects": true, "showObjectChanges": true }]),
        )
        .await
    }
}

/// Split a JSON-RPC envelope into its result or its error
pub fn decode_rpc_response<T: DeserializeOwned>(mut envelope: Value) -> LedgerResult<T> {
    if let Some(error) = envelope.get("error").filter(|e| !e.is_null()) {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(LedgerError::Rpc { code, message });
    }

    let result = envelope
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| LedgerError::Decode("response has neither result nor error".to_string()))?;
    serde_json::from_value(result).map_err(|e| LedgerError::Decode(e.to_string()))
}

#[async_trait]
impl LedgerClient for SuiRpcClient {
    async fn get_owned_objects(
        &self,
        owner: &SuiAddress,
        struct_type: &str,
        cursor: Option<&str>,
    ) -> LedgerResult<ObjectPage> {
        self.call(
            "suix_getOwnedObjects",
            json!([
                owner.to_hex(),
                {
                    "filter": { "StructType": struct_type },
                    "options": { "showContent": true, "showType": true },
                },
                cursor,
                null,
            ]),
        )
        .await
    }

    async fn get_normalized_module(
        &self,
        package: &ObjectId,
        module: &str,
    ) -> LedgerResult<NormalizedModule> {
        self.call("sui_getNormalizedMoveModule", json!([package.to_hex(), module]))
            .await
    }

    async fn wait_for_transaction(&self, digest: &TransactionDigest) -> LedgerResult<()> {
        let started = tokio::time::Instant::now();
        loop {
            // Unknown digests come back as RPC errors until the node has indexed them
            let last_error = match self.get_transaction_block(digest).await {
                Ok(_) => return Ok(()),
                Err(e) => e,
            };

            if started.elapsed() + self.settings.poll_interval > self.settings.finality_timeout {
                return Err(LedgerError::Timeout(format!(
                    "transaction {} not final after {:?} ({})",
                    digest, self.settings.finality_timeout, last_error
                )));
            }
            log::debug!("transaction {} not yet available: {}", digest, last_error);
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }
}
