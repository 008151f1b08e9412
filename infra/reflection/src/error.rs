use std::borrow::Cow;

/// Failures raised while introspecting a class or invoking its accessors.
#[sqlmap_derive::sqlmap_error]
#[derive(Clone)]
pub enum ReflectionError {
    /// The class description is unusable. Never cached as a negative result.
    #[error("Introspection of '{class}' failed{}: {message}", format_context(.context))]
    Introspection {
        class: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("There is no {accessor} for property named '{property}' in '{class}'{}", format_context(.context))]
    PropertyNotFound {
        class: Cow<'static, str>,
        property: String,
        accessor: &'static str,
        context: Option<Cow<'static, str>>,
    },

    /// An accessor was applied to the wrong target or given a value of the wrong type.
    #[error("Invocation error{}: {message}", format_context(.context))]
    Invocation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
