//! # Reflection
//!
//! Per-class property metadata with process-wide memoization.
//!
//! * **[`ClassShape`]**: the raw description a type gives of itself, usually produced by
//!   `#[derive(Reflect)]`.
//! * **[`ClassMetadata`]**: the validated, immutable index of readable and writable
//!   properties, their types and the default constructor.
//! * **[`ReflectorFactory`]**: hands out shared [`ClassMetadata`] per class through a
//!   pluggable [`MetadataCache`], with a runtime toggle to bypass it.
//!
//! ## Example
//!
//! ```rust
//! use sqlmap_reflection::{Reflect, ReflectorFactory};
//! use std::sync::Arc;
//!
//! #[derive(Debug, Default, Clone, Reflect)]
//! #[reflect(default_constructor)]
//! struct Blog {
//!     id: i64,
//!     title: String,
//! }
//!
//! # fn main() -> Result<(), sqlmap_reflection::ReflectionError> {
//! let factory = ReflectorFactory::new();
//! let first = factory.find_for_class::<Blog>()?;
//! let second = factory.find_for_class::<Blog>()?;
//! assert!(Arc::ptr_eq(&first, &second));
//!
//! let mut blog = Blog::default();
//! first.set_value(&mut blog, "title", "Hello".to_owned())?;
//! assert_eq!(blog.title, "Hello");
//! assert!(first.instantiate()?.downcast_ref::<Blog>().is_some());
//! # Ok(())
//! # }
//! ```

mod cache;
mod error;
mod factory;
mod metadata;
mod shape;

pub use cache::{BoundedCache, MemoryCache, MetadataCache, NoopCache};
pub use error::{ReflectionError, ReflectionErrorExt};
pub use factory::ReflectorFactory;
pub use metadata::ClassMetadata;
pub use shape::{BoxedValue, ClassId, ClassShape, Constructor, Getter, PropertyDecl, Reflect, Setter};
pub use sqlmap_derive::Reflect;
