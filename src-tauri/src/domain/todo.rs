//! Todo Entity
//!
//! Client-side projection of one `todo::Todo` object owned by the account.

use serde::{Deserialize, Serialize};

use super::address::ObjectId;
use super::error::{DomainError, DomainResult};

/// Max length of todo text in bytes
pub const MAX_TEXT_LEN: usize = 2000;

/// A todo as last seen on the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Object id assigned by the ledger at creation
    pub id: ObjectId,
    pub text: String,
    pub done: bool,
    /// Object version at fetch time; bumps on every mutation, never part of identity
    pub version: u64,
}

/// Trim and validate text for create/update.
pub fn normalize_text(raw: &str) -> DomainResult<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(DomainError::InvalidInput("todo text cannot be empty".to_string()));
    }
    if text.len() > MAX_TEXT_LEN {
        return Err(DomainError::InvalidInput(format!(
            "todo text is too long, max size is {} bytes",
            MAX_TEXT_LEN
        )));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_text("  Buy milk \n").unwrap(), "Buy milk");
    }

    #[test]
    fn test_normalize_rejects_blank() {
        assert!(matches!(normalize_text(""), Err(DomainError::InvalidInput(_))));
        assert!(matches!(normalize_text(" \t\n "), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_normalize_rejects_oversized() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        assert!(normalize_text(&long).is_err());
        let exact = "x".repeat(MAX_TEXT_LEN);
        assert!(normalize_text(&exact).is_ok());
    }
}
