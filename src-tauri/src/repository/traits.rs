//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.

use async_trait::async_trait;
use crate::domain::DomainResult;

/// String key/value storage
///
/// All operations are async to support various backends.
#[async_trait]
pub trait KeyValueRepository: Send + Sync {
    /// Value stored under `key`, if any
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Insert or replace
    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Remove `key`; missing keys are not an error
    async fn remove(&self, key: &str) -> DomainResult<()>;
}
