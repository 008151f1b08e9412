//! # Type Errors
//!
//! Failures raised while resolving generic type arguments or converting values between the
//! host representation and driver-level [`SqlValue`](crate::SqlValue)s.

use std::borrow::Cow;

#[sqlmap_derive::sqlmap_error]
#[derive(Clone)]
pub enum TypeError {
    /// A subclass of the parameterized base never binds its type argument.
    #[error(
        "'{class}' extends {base} but misses the type parameter. Remove the extension or add a type parameter to it{}",
        format_context(.context)
    )]
    MissingTypeParameter {
        class: Cow<'static, str>,
        base: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The declared hierarchy cannot be walked (e.g. it is cyclic).
    #[error("Invalid class hierarchy{}: {message}", format_context(.context))]
    InvalidHierarchy { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A value could not be converted to or from its driver representation.
    #[error("Conversion error{}: {message}", format_context(.context))]
    Conversion { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The driver rejected a bind or a read.
    #[error("Driver error{}: {message}", format_context(.context))]
    Driver { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
