//! The conversion contract between host values and driver-level values.

use crate::binding::GenericTypeBinding;
use crate::error::TypeError;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// SQL type codes a caller can attach to a bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum JdbcType {
    Array,
    Bigint,
    Binary,
    Bit,
    Blob,
    Boolean,
    Char,
    Clob,
    Date,
    Decimal,
    Double,
    Float,
    Integer,
    LongVarchar,
    Null,
    Numeric,
    Other,
    Real,
    Smallint,
    Time,
    Timestamp,
    Tinyint,
    Varbinary,
    Varchar,
}

/// A value as the driver sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl SqlValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// A short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
        }
    }
}

/// Positional parameter slots of a prepared statement (1-based, like the driver).
pub trait PreparedStatement {
    /// # Errors
    /// Returns [`TypeError::Driver`] if the slot cannot take the value.
    fn bind(&mut self, index: usize, value: SqlValue, jdbc_type: Option<JdbcType>) -> Result<(), TypeError>;
}

/// The current row of a result set.
pub trait ResultSet {
    /// # Errors
    /// Returns [`TypeError::Driver`] if no such column exists.
    fn column_by_name(&self, column: &str) -> Result<SqlValue, TypeError>;

    /// # Errors
    /// Returns [`TypeError::Driver`] if the ordinal is out of range.
    fn column_by_index(&self, index: usize) -> Result<SqlValue, TypeError>;
}

/// Output parameters of a callable (stored procedure) invocation.
pub trait CallableStatement {
    /// # Errors
    /// Returns [`TypeError::Driver`] if the ordinal is not an output parameter.
    fn out_parameter(&self, index: usize) -> Result<SqlValue, TypeError>;
}

/// Converts one host type to and from driver values.
///
/// Handlers are opaque to the registry and the reflection cache; they are keyed by the type
/// they convert, which [`TypeHandler::type_binding`] exposes.
pub trait TypeHandler: Send + Sync {
    type Value;

    /// The host type this handler converts.
    fn type_binding(&self) -> &GenericTypeBinding;

    /// Binds `parameter` into slot `index`. `None` binds SQL `NULL`.
    ///
    /// # Errors
    /// Returns [`TypeError::Conversion`] if the value cannot be represented, or a driver error.
    fn set_parameter(
        &self,
        statement: &mut dyn PreparedStatement,
        index: usize,
        parameter: Option<&Self::Value>,
        jdbc_type: Option<JdbcType>,
    ) -> Result<(), TypeError>;

    /// # Errors
    /// Returns [`TypeError::Conversion`] for values of the wrong shape, or a driver error.
    fn get_result_by_name(&self, rs: &dyn ResultSet, column: &str) -> Result<Option<Self::Value>, TypeError>;

    /// # Errors
    /// Returns [`TypeError::Conversion`] for values of the wrong shape, or a driver error.
    fn get_result_by_index(&self, rs: &dyn ResultSet, index: usize) -> Result<Option<Self::Value>, TypeError>;

    /// # Errors
    /// Returns [`TypeError::Conversion`] for values of the wrong shape, or a driver error.
    fn get_output(&self, cs: &dyn CallableStatement, index: usize) -> Result<Option<Self::Value>, TypeError>;
}

/// Non-null conversions; [`TypeHandler`] is derived from it with uniform `NULL` handling.
///
/// Binding `None` needs an explicit [`JdbcType`], since drivers cannot infer the type of a
/// `NULL`. Reading SQL `NULL` yields `None`.
pub trait ValueConverter: Send + Sync {
    type Host;

    fn binding(&self) -> &GenericTypeBinding;

    /// # Errors
    /// Returns [`TypeError::Conversion`] if the value cannot be represented.
    fn to_sql(&self, value: &Self::Host, jdbc_type: Option<JdbcType>) -> Result<SqlValue, TypeError>;

    /// Called with non-null values only.
    ///
    /// # Errors
    /// Returns [`TypeError::Conversion`] for values of the wrong shape.
    fn from_sql(&self, value: SqlValue) -> Result<Self::Host, TypeError>;
}

impl<C: ValueConverter> TypeHandler for C {
    type Value = C::Host;

    fn type_binding(&self) -> &GenericTypeBinding {
        self.binding()
    }

    fn set_parameter(
        &self,
        statement: &mut dyn PreparedStatement,
        index: usize,
        parameter: Option<&C::Host>,
        jdbc_type: Option<JdbcType>,
    ) -> Result<(), TypeError> {
        let value = match parameter {
            Some(value) => self.to_sql(value, jdbc_type)?,
            None if jdbc_type.is_none() => {
                return Err(TypeError::Conversion {
                    message: "JDBC requires that the JdbcType must be specified for all nullable parameters"
                        .into(),
                    context: Some(format!("parameter #{index}").into()),
                });
            },
            None => SqlValue::Null,
        };
        statement.bind(index, value, jdbc_type)
    }

    fn get_result_by_name(&self, rs: &dyn ResultSet, column: &str) -> Result<Option<C::Host>, TypeError> {
        self.nullable(rs.column_by_name(column)?)
    }

    fn get_result_by_index(&self, rs: &dyn ResultSet, index: usize) -> Result<Option<C::Host>, TypeError> {
        self.nullable(rs.column_by_index(index)?)
    }

    fn get_output(&self, cs: &dyn CallableStatement, index: usize) -> Result<Option<C::Host>, TypeError> {
        self.nullable(cs.out_parameter(index)?)
    }
}

trait Nullable: ValueConverter {
    fn nullable(&self, value: SqlValue) -> Result<Option<Self::Host>, TypeError> {
        if value.is_null() { Ok(None) } else { self.from_sql(value).map(Some) }
    }
}

impl<C: ValueConverter> Nullable for C {}
