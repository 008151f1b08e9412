//! # Registry
//!
//! Append-only, namespace-qualified lookup for configuration artifacts.
//!
//! [`StrictRegistry`] stores each value under its full dotted name and also under the
//! name's last segment. The short form works as an alias while it is unique. Once two
//! full names share it, looking it up fails with [`RegistryError::Ambiguous`] instead of
//! picking one of them.
//!
//! ## Example
//!
//! ```rust
//! use sqlmap_registry::{RegistryError, StrictRegistry};
//!
//! # fn main() -> Result<(), RegistryError> {
//! let mut statements = StrictRegistry::new("Mapped Statements collection");
//! statements.put("blog.BlogMapper.selectBlog", 1)?;
//! statements.put("blog.AuthorMapper.selectBlog", 2)?;
//!
//! assert_eq!(statements.get("blog.BlogMapper.selectBlog")?, &1);
//! assert!(matches!(statements.get("selectBlog"), Err(RegistryError::Ambiguous { .. })));
//! # Ok(())
//! # }
//! ```

mod error;
mod strict;

pub use error::{RegistryError, RegistryErrorExt};
pub use strict::StrictRegistry;
