//! Handlers for the common scalar types.

use crate::binding::{GenericTypeBinding, TYPE_REFERENCE};
use crate::error::TypeError;
use crate::handler::{JdbcType, SqlValue, ValueConverter};
use crate::hierarchy::{ClassDecl, TypeExpr};

pub static STRING: ClassDecl = ClassDecl::root("java.lang.String");
pub static LONG: ClassDecl = ClassDecl::root("java.lang.Long");
pub static BOOLEAN: ClassDecl = ClassDecl::root("java.lang.Boolean");

/// The abstract handler base; concrete handlers bind its type argument.
pub static BASE_TYPE_HANDLER: ClassDecl = ClassDecl::extends("BaseTypeHandler", &TYPE_REFERENCE);

static STRING_ARG: [TypeExpr; 1] = [TypeExpr::Class(&STRING)];
static LONG_ARG: [TypeExpr; 1] = [TypeExpr::Class(&LONG)];
static BOOLEAN_ARG: [TypeExpr; 1] = [TypeExpr::Class(&BOOLEAN)];

pub static STRING_TYPE_HANDLER: ClassDecl =
    ClassDecl::extends_generic("StringTypeHandler", &BASE_TYPE_HANDLER, &STRING_ARG);
pub static LONG_TYPE_HANDLER: ClassDecl =
    ClassDecl::extends_generic("LongTypeHandler", &BASE_TYPE_HANDLER, &LONG_ARG);
pub static BOOLEAN_TYPE_HANDLER: ClassDecl =
    ClassDecl::extends_generic("BooleanTypeHandler", &BASE_TYPE_HANDLER, &BOOLEAN_ARG);

fn mismatch(expected: &'static str, value: &SqlValue) -> TypeError {
    TypeError::Conversion {
        message: format!("expected {expected}, got {}", value.kind()).into(),
        context: None,
    }
}

macro_rules! scalar_handler {
    ($(#[$meta:meta])* $name:ident, $decl:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name {
            binding: GenericTypeBinding,
        }

        impl $name {
            /// Resolves the handler's type binding from its declaration.
            ///
            /// # Errors
            /// Returns [`TypeError::MissingTypeParameter`] if the declaration is unbound.
            pub fn new() -> Result<Self, TypeError> {
                Self::for_class(&$decl)
            }

            /// Builds the handler for a subclass declaration of it.
            ///
            /// # Errors
            /// Returns [`TypeError::MissingTypeParameter`] if `class` binds no type argument.
            pub fn for_class(class: &'static ClassDecl) -> Result<Self, TypeError> {
                Ok(Self { binding: GenericTypeBinding::resolve(class)? })
            }
        }
    };
}

scalar_handler!(
    /// `String` <-> `VARCHAR`/`CHAR`/`CLOB` text.
    StringTypeHandler,
    STRING_TYPE_HANDLER
);
scalar_handler!(
    /// `i64` <-> integral columns.
    LongTypeHandler,
    LONG_TYPE_HANDLER
);
scalar_handler!(
    /// `bool` <-> `BOOLEAN`/`BIT`, also accepting `0`/`1` integers on read.
    BooleanTypeHandler,
    BOOLEAN_TYPE_HANDLER
);

impl ValueConverter for StringTypeHandler {
    type Host = String;

    fn binding(&self) -> &GenericTypeBinding {
        &self.binding
    }

    fn to_sql(&self, value: &String, _jdbc_type: Option<JdbcType>) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::Text(value.clone()))
    }

    fn from_sql(&self, value: SqlValue) -> Result<String, TypeError> {
        match value {
            SqlValue::Text(text) => Ok(text),
            other => Err(mismatch("text", &other)),
        }
    }
}

impl ValueConverter for LongTypeHandler {
    type Host = i64;

    fn binding(&self) -> &GenericTypeBinding {
        &self.binding
    }

    fn to_sql(&self, value: &i64, _jdbc_type: Option<JdbcType>) -> Result<SqlValue, TypeError> {
        Ok(SqlValue::Int(*value))
    }

    fn from_sql(&self, value: SqlValue) -> Result<i64, TypeError> {
        match value {
            SqlValue::Int(n) => Ok(n),
            SqlValue::Text(text) => text.trim().parse().map_err(|_| TypeError::Conversion {
                message: format!("'{text}' is not an integer").into(),
                context: None,
            }),
            other => Err(mismatch("int", &other)),
        }
    }
}

impl ValueConverter for BooleanTypeHandler {
    type Host = bool;

    fn binding(&self) -> &GenericTypeBinding {
        &self.binding
    }

    fn to_sql(&self, value: &bool, jdbc_type: Option<JdbcType>) -> Result<SqlValue, TypeError> {
        Ok(match jdbc_type {
            Some(JdbcType::Integer | JdbcType::Smallint | JdbcType::Tinyint) => SqlValue::Int(i64::from(*value)),
            _ => SqlValue::Bool(*value),
        })
    }

    fn from_sql(&self, value: SqlValue) -> Result<bool, TypeError> {
        match value {
            SqlValue::Bool(b) => Ok(b),
            SqlValue::Int(0) => Ok(false),
            SqlValue::Int(1) => Ok(true),
            other => Err(mismatch("bool", &other)),
        }
    }
}
