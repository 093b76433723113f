//! App Configuration
//!
//! Optional `config.json` in the app config directory. Every field has a
//! default, so a missing or partial file is fine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::{DomainError, DomainResult, Network, SuiAddress};
use crate::ledger::RpcSettings;

pub const CONFIG_FILE: &str = "config.json";

/// Gas budget per transaction, in MIST
pub const DEFAULT_GAS_BUDGET: u64 = 10_000_000;

/// Floor for the finality poll interval
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sui CLI keystore; defaults to `~/.sui/sui_config/sui.keystore`
    pub keystore_path: Option<PathBuf>,
    /// Sign with this address instead of the first key in the keystore
    pub signer_address: Option<String>,
    pub gas_budget: u64,
    pub request_timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub finality_timeout_secs: u64,
    /// Replace the public fullnode for a network, keyed by `testnet` / `mainnet`
    pub rpc_urls: HashMap<Network, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let rpc = RpcSettings::default();
        Self {
            keystore_path: None,
            signer_address: None,
            gas_budget: DEFAULT_GAS_BUDGET,
            request_timeout_secs: rpc.request_timeout.as_secs(),
            poll_interval_ms: rpc.poll_interval.as_millis() as u64,
            finality_timeout_secs: rpc.finality_timeout.as_secs(),
            rpc_urls: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load from `path`; a missing file gives the defaults
    pub fn load(path: &Path) -> DomainResult<Self> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Storage(format!("cannot read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| DomainError::InvalidInput(format!("{}: {}", path.display(), e)))
    }

    pub fn keystore_path(&self) -> PathBuf {
        match &self.keystore_path {
            Some(path) => path.clone(),
            None => dirs_next::home_dir()
                .unwrap_or_default()
                .join(".sui")
                .join("sui_config")
                .join("sui.keystore"),
        }
    }

    pub fn signer(&self) -> DomainResult<Option<SuiAddress>> {
        self.signer_address
            .as_deref()
            .map(SuiAddress::parse)
            .transpose()
    }

    pub fn rpc_url(&self, network: Network) -> String {
        self.rpc_urls
            .get(&network)
            .cloned()
            .unwrap_or_else(|| network.fullnode_url().to_string())
    }

    pub fn rpc_settings(&self) -> RpcSettings {
        RpcSettings {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS)),
            finality_timeout: Duration::from_secs(self.finality_timeout_secs),
        }
    }
}
