//! Facade crate for the mapper metadata substrate.
//! Re-exports the domain, kernel and infrastructure crates and assembles them into a
//! [`Configuration`]. Keep this crate thin: it composes other crates, it does not implement
//! their logic.
//!
//! ## Usage
//! ```rust
//! use sqlmap::{Configuration, MappedArtifact};
//!
//! # fn main() -> Result<(), sqlmap::ConfigurationError> {
//! let mut configuration = Configuration::default();
//! configuration.add_mapped_statement(MappedArtifact::new("blog.BlogMapper.selectBlog", "BlogMapper.xml"))?;
//!
//! assert_eq!(configuration.mapped_statement("selectBlog")?.resource(), "BlogMapper.xml");
//! # Ok(())
//! # }
//! ```

mod configuration;
mod error;

pub use configuration::{CACHES, Configuration, MAPPED_STATEMENTS, MappedArtifact, RESULT_MAPS};
pub use error::{ConfigurationError, ConfigurationErrorExt};

pub use sqlmap_domain as domain;
pub use sqlmap_kernel as kernel;
pub use sqlmap_reflection as reflection;
pub use sqlmap_registry as registry;
pub use sqlmap_types as types;
