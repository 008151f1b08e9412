use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Lifetime of the local result cache kept by an executor.
///
/// `Session` reuses cached results across every statement of a session until the session
/// ends or the cache is cleared. `Statement` clears the cache after each statement, which
/// disables reuse between statements.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CacheScope {
    #[default]
    #[serde(alias = "session", alias = "Session")]
    Session,
    #[serde(alias = "statement", alias = "Statement")]
    Statement,
}

impl CacheScope {
    /// Whether cached results must be dropped once a statement completes.
    #[must_use]
    pub const fn clears_after_statement(self) -> bool {
        matches!(self, Self::Statement)
    }
}
