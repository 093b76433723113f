//! Settings Repository
//!
//! Persists the package override and the selected network.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::traits::KeyValueRepository;
use crate::domain::{DomainError, DomainResult, Network};

/// Package id override, `0x…`
pub const PACKAGE_OVERRIDE_KEY: &str = "sui_pkg";
pub const NETWORK_KEY: &str = "sui_network";

/// Settings read once when a session opens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSettings {
    pub package_override: Option<String>,
    pub network: Network,
}

pub struct SettingsRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SettingsRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Load both settings; an unknown stored network falls back to the default
    pub async fn load_session_settings(&self) -> DomainResult<SessionSettings> {
        let package_override = self.get(PACKAGE_OVERRIDE_KEY).await?;
        let network = match self.get(NETWORK_KEY).await? {
            Some(raw) => Network::parse(&raw).unwrap_or_else(|| {
                log::warn!("ignoring unknown stored network {:?}", raw);
                Network::default()
            }),
            None => Network::default(),
        };
        Ok(SessionSettings {
            package_override,
            network,
        })
    }

    /// Store a package override; only `0x…` values are accepted
    pub async fn set_package_override(&self, value: &str) -> DomainResult<()> {
        let value = value.trim();
        if !value.starts_with("0x") {
            return Err(DomainError::InvalidInput(
                "package id must start with 0x".to_string(),
            ));
        }
        self.set(PACKAGE_OVERRIDE_KEY, value).await
    }

    pub async fn clear_package_override(&self) -> DomainResult<()> {
        self.remove(PACKAGE_OVERRIDE_KEY).await
    }

    pub async fn set_network(&self, network: Network) -> DomainResult<()> {
        self.set(NETWORK_KEY, network.as_str()).await
    }
}

#[async_trait]
impl KeyValueRepository for SettingsRepository {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT value FROM settings WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(DomainError::storage)
    }

    async fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let now = chrono::Local::now().timestamp_millis();
        conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE
             SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .map_err(DomainError::storage)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM settings WHERE key = ?", params![key])
            .map_err(DomainError::storage)?;
        Ok(())
    }
}
