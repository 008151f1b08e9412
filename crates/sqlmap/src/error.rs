use sqlmap_kernel::config::ConfigError;
use sqlmap_reflection::ReflectionError;
use sqlmap_registry::RegistryError;
use std::borrow::Cow;

#[sqlmap_derive::sqlmap_error]
pub enum ConfigurationError {
    #[error("Registry error{}: {source}", format_context(.context))]
    Registry { source: RegistryError, context: Option<Cow<'static, str>> },

    #[error("Reflection error{}: {source}", format_context(.context))]
    Reflection { source: ReflectionError, context: Option<Cow<'static, str>> },

    #[error("Settings error{}: {source}", format_context(.context))]
    Settings { source: ConfigError, context: Option<Cow<'static, str>> },
}
