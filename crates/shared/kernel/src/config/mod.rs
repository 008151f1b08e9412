use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use sqlmap_domain::Settings;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides, e.g. `SQLMAP__LOCAL_CACHE_SCOPE=STATEMENT`.
pub const ENV_PREFIX: &str = "SQLMAP";

/// File read when no explicit path is given; any extension `config` understands works.
pub const DEFAULT_SETTINGS_FILE: &str = "sqlmap";

#[sqlmap_derive::sqlmap_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a settings structure from a file with environment overrides on top.
///
/// 1. **Base File**: required; defaults to [`DEFAULT_SETTINGS_FILE`] in the working directory.
/// 2. **Environment Overrides**: variables prefixed with `SQLMAP__`. Nested fields use double
///    underscores, and scalar values are parsed into booleans and numbers.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or unreadable, or if the merged
/// values do not match `T`.
///
/// # Example
/// ```rust,no_run
/// use sqlmap_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct Limits {
///     max_statements: u32,
/// }
///
/// let limits: Limits = load_config(Some("config/limits.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, None)
}

/// Like [`load_config`], but reads overrides from `env` instead of the process environment
/// when it is given. Keys keep their `SQLMAP__` prefix.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true).source(env));

    info!("Loading settings from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build settings")?
        .try_deserialize::<T>()
        .context("Failed to deserialize settings")?;

    Ok(config)
}

/// [`load_config`] specialised to [`Settings`].
///
/// # Errors
/// See [`load_config`].
pub fn load_settings(path: Option<impl AsRef<Path>>) -> Result<Settings, ConfigError> {
    load_config::<Settings>(path)
}
