//! # Domain Models
//!
//! Plain configuration data with minimal dependencies (`serde`, `strum`).
//! No I/O and no behavior beyond parsing and defaults.

pub mod cache_scope;
pub mod settings;

pub use cache_scope::CacheScope;
pub use settings::{Settings, SettingsInner};
