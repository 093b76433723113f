//! Package Identity
//!
//! Which deployed package the session targets, and the Move names inside it.

use serde::{Deserialize, Serialize};

use super::address::{ObjectId, SuiAddress};
use super::error::DomainResult;

/// Compiled-in package id; the `sui_pkg` override replaces it at runtime
pub const DEFAULT_PACKAGE_ID: &str =
    "0x602fae580f5863abfb31bf356decfdc73bf1224a62aacf6b4829ffa2dbe58390";

pub const TODO_MODULE: &str = "todo";
pub const TODO_STRUCT: &str = "Todo";

/// Where the active package id came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageSource {
    Default,
    Override,
}

/// Package id fixed for the lifetime of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedPackage {
    pub id: ObjectId,
    pub source: PackageSource,
}

impl ResolvedPackage {
    /// `<package>::todo::Todo`, the filter for owned object queries
    pub fn todo_struct_type(&self) -> String {
        self.todo_struct_tag().to_string()
    }

    pub fn todo_struct_tag(&self) -> StructTag {
        StructTag {
            address: self.id,
            module: TODO_MODULE.to_string(),
            name: TODO_STRUCT.to_string(),
        }
    }
}

/// Resolve the package id: a stored override wins over the compiled-in default.
///
/// Overrides that do not start with `0x` or fail to parse are ignored.
pub fn resolve_package_id(stored_override: Option<&str>) -> DomainResult<ResolvedPackage> {
    if let Some(raw) = stored_override.map(str::trim) {
        if raw.starts_with("0x") {
            if let Ok(id) = SuiAddress::parse(raw) {
                return Ok(ResolvedPackage {
                    id,
                    source: PackageSource::Override,
                });
            }
        }
    }

    Ok(ResolvedPackage {
        id: SuiAddress::parse(DEFAULT_PACKAGE_ID)?,
        source: PackageSource::Default,
    })
}

/// Fully qualified Move struct name, `address::module::Name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructTag {
    pub address: SuiAddress,
    pub module: String,
    pub name: String,
}

impl StructTag {
    /// Parse a type string as the fullnode renders it.
    ///
    /// Returns `None` for anything that is not exactly three `::`-separated parts
    /// with a valid address. Generic instantiations either carry a `<...>` suffix
    /// in `name` or are rejected, so they never equal a plain struct name.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().splitn(3, "::");
        let address = SuiAddress::parse(parts.next()?).ok()?;
        let module = parts.next()?;
        let name = parts.next()?;
        if module.is_empty() || name.is_empty() || name.contains("::") {
            return None;
        }
        Some(Self {
            address,
            module: module.to_string(),
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for StructTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)
    }
}
