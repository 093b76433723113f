//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod settings_repo;


pub use traits::KeyValueRepository;
pub use db::{init_db, DbState};
pub use settings_repo::{SessionSettings, SettingsRepository, NETWORK_KEY, PACKAGE_OVERRIDE_KEY};
