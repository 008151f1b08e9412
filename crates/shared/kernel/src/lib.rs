//! Kernel utilities shared across the metadata crates.
//! Keep this crate lightweight; it owns settings loading and re-exports the domain types.
//!
//! ## Settings loading
//! ```rust,no_run
//! use sqlmap_kernel::config::load_settings;
//!
//! let settings = load_settings(Some("sqlmap.toml")).unwrap_or_default();
//! println!("local cache scope: {}", settings.local_cache_scope);
//! ```
pub mod config;

pub use sqlmap_domain as domain;
