//! # Types
//!
//! Generic type-argument resolution and the type-handler conversion contract.
//!
//! * **[`GenericTypeBinding`]**: climbs a static [`ClassDecl`] hierarchy from a handler
//!   subclass up to [`TYPE_REFERENCE`] and captures the first concrete type argument.
//! * **[`TypeHandler`]**: binds host values into prepared-statement slots and reads them
//!   back from result sets and callable output parameters.
//! * **[`ValueConverter`]**: the non-null half of a handler; `NULL` handling is shared.
//!
//! ## Example
//!
//! ```rust
//! use sqlmap_types::{ClassDecl, LongTypeHandler, LONG_TYPE_HANDLER, TypeHandler};
//!
//! // A custom handler that inherits its type argument from `LongTypeHandler`.
//! static ID_HANDLER: ClassDecl = ClassDecl::extends("IdHandler", &LONG_TYPE_HANDLER);
//!
//! # fn main() -> Result<(), sqlmap_types::TypeError> {
//! let handler = LongTypeHandler::for_class(&ID_HANDLER)?;
//! assert_eq!(handler.type_binding().to_string(), "java.lang.Long");
//! # Ok(())
//! # }
//! ```

mod binding;
mod builtin;
mod error;
mod handler;
mod hierarchy;

pub use binding::{GenericTypeBinding, TYPE_REFERENCE};
pub use builtin::{
    BASE_TYPE_HANDLER, BOOLEAN, BOOLEAN_TYPE_HANDLER, BooleanTypeHandler, LONG, LONG_TYPE_HANDLER,
    LongTypeHandler, STRING, STRING_TYPE_HANDLER, StringTypeHandler,
};
pub use error::{TypeError, TypeErrorExt};
pub use handler::{
    CallableStatement, JdbcType, PreparedStatement, ResultSet, SqlValue, TypeHandler,
    ValueConverter,
};
pub use hierarchy::{ClassDecl, SuperType, TypeExpr};
