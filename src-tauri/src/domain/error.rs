//! Domain Layer - Errors
//!
//! Validation and state errors shared by every layer above the domain.

use serde::{Deserialize, Serialize};

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainError {
    /// Rejected user or config input
    InvalidInput(String),
    /// Settings database or config file could not be read or written
    Storage(String),
}

impl DomainError {
    pub fn storage(e: impl std::fmt::Display) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
