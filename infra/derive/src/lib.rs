#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the metadata substrate.
//! This crate removes the boilerplate around domain error enums and around describing a
//! struct's properties to the reflection cache.
//!
//! ## Usage
//! Consumers normally reach these macros through re-exports (`sqlmap_reflection::Reflect`)
//! or by path (`#[sqlmap_derive::sqlmap_error]`).
//!
//! See each macro's docstring for examples; they are `ignore`d to avoid compiling in this crate.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// A high-level attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a source field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides `From<&'static str>` and `From<String>` implementations
///   if an `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping upstream errors must include a `source` field (or a field marked
///    `#[source]`/`#[from]`) **and** a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[sqlmap_derive::sqlmap_error]
/// pub enum LoaderError {
///     #[error("Settings error{}: {source}", format_context(.context))]
///     Settings { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<(), LoaderError> {
///     read_settings().context("Reading mapper settings")?;
///     Err("not wired yet".into())
/// }
/// ```
#[proc_macro_attribute]
pub fn sqlmap_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Derives `sqlmap_reflection::Reflect` for a struct with named fields.
///
/// Every field becomes a readable and writable property named after the field. Field types
/// must be `Clone + Send + 'static` because getters hand out owned copies.
///
/// # Field attributes
///
/// * `#[reflect(skip)]` - the field is not exposed.
/// * `#[reflect(read_only)]` / `#[reflect(write_only)]` - only one accessor is generated.
/// * `#[reflect(rename = "...")]` - exposes the field under another property name.
///
/// # Struct attributes
///
/// `#[reflect(default_constructor)]` registers `Default::default` as the default constructor.
/// The struct must implement `Default`, derived or by hand. Without the attribute the
/// metadata reports no default constructor, even if `Default` is derived: derive macros
/// never see the other derives of the item.
///
/// # Example
///
/// ```rust,ignore
/// use sqlmap_reflection::Reflect;
///
/// #[derive(Debug, Clone, Default, Reflect)]
/// #[reflect(default_constructor)]
/// struct Author {
///     id: i64,
///     #[reflect(rename = "username")]
///     name: String,
///     #[reflect(skip)]
///     password_hash: String,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::reflect::expand_derive(input).into()
}
