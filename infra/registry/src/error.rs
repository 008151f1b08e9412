use std::borrow::Cow;

#[sqlmap_derive::sqlmap_error]
#[derive(Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A full name was registered twice.
    #[error("{registry} already contains value for {key}{detail}{}", format_context(.context))]
    Duplicate {
        registry: Cow<'static, str>,
        key: String,
        detail: String,
        context: Option<Cow<'static, str>>,
    },

    #[error("{registry} does not contain value for {key}{}", format_context(.context))]
    NotFound { registry: Cow<'static, str>, key: String, context: Option<Cow<'static, str>> },

    /// A short key produced by more than one full name.
    #[error(
        "{key} is ambiguous in {registry} (try using the full name including the namespace, or rename one of the entries){}",
        format_context(.context)
    )]
    Ambiguous { registry: Cow<'static, str>, key: String, context: Option<Cow<'static, str>> },
}
