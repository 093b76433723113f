//! Ledger Identifiers
//!
//! Account addresses, object ids and transaction digests as the fullnode
//! renders them. Addresses and object ids share one 32-byte representation.

use std::fmt;
use std::str::FromStr;

use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::{DomainError, DomainResult};

/// Byte length of addresses and object ids
pub const ADDRESS_LENGTH: usize = 32;

/// A 32-byte account address, rendered as `0x` + 64 lowercase hex digits
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuiAddress([u8; ADDRESS_LENGTH]);

/// Object ids use the same encoding as account addresses
pub type ObjectId = SuiAddress;

impl SuiAddress {
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Parse a `0x`-prefixed hex string.
    ///
    /// Short forms such as `0x2` are left-padded with zeros.
    pub fn parse(s: &str) -> DomainResult<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| {
                DomainError::InvalidInput(format!("address must start with 0x: {}", s))
            })?;

        if digits.is_empty() || digits.len() > ADDRESS_LENGTH * 2 {
            return Err(DomainError::InvalidInput(format!(
                "address must have 1 to {} hex digits: {}",
                ADDRESS_LENGTH * 2,
                s
            )));
        }

        let padded = format!("{:0>width$}", digits, width = ADDRESS_LENGTH * 2);
        let decoded = HEXLOWER_PERMISSIVE
            .decode(padded.as_bytes())
            .map_err(|e| DomainError::InvalidInput(format!("invalid hex in {}: {}", s, e)))?;

        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Full `0x` + 64 hex digit form
    pub fn to_hex(&self) -> String {
        format!("0x{}", HEXLOWER.encode(&self.0))
    }

    /// Abbreviated form for headers: `0x1234...abcd`
    pub fn short(&self) -> String {
        let hex = self.to_hex();
        format!("{}...{}", &hex[..6], &hex[hex.len() - 4..])
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiAddress({})", self.to_hex())
    }
}

impl FromStr for SuiAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SuiAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Base58 transaction digest as returned by the fullnode.
///
/// Only ever compared and echoed back, so it stays opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionDigest(String);

impl TransactionDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pads_short_form() {
        let addr = SuiAddress::parse("0x2").unwrap();
        assert_eq!(addr.as_bytes()[31], 2);
        assert_eq!(
            addr.to_hex(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
    }

    #[test]
    fn test_parse_accepts_mixed_case() {
        let lower = SuiAddress::parse("0xabcdef").unwrap();
        let upper = SuiAddress::parse("0xABCDEF").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(SuiAddress::parse("1234").is_err());
        assert!(SuiAddress::parse("0x").is_err());
        assert!(SuiAddress::parse("0xzz").is_err());
        let too_long = format!("0x{}", "1".repeat(65));
        assert!(SuiAddress::parse(&too_long).is_err());
    }

    #[test]
    fn test_short_form() {
        let addr = SuiAddress::parse(
            "0x1234000000000000000000000000000000000000000000000000000000abcd",
        )
        .unwrap();
        assert_eq!(addr.short(), "0x0012...abcd");
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let addr = SuiAddress::parse("0x5").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr.to_hex()));
        let back: SuiAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
