use crate::cache_scope::CacheScope;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Settings consumed when a configuration is assembled.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SettingsInner {
    /// Memoize class metadata. Can be toggled again at runtime.
    pub class_cache_enabled: bool,
    /// Upper bound on memoized classes; `None` keeps every class.
    pub class_cache_capacity: Option<u64>,
    pub local_cache_scope: CacheScope,
}

impl Default for SettingsInner {
    fn default() -> Self {
        Self { class_cache_enabled: true, class_cache_capacity: None, local_cache_scope: CacheScope::Session }
    }
}

/// Thin Arc-wrapped settings for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(flatten, default)]
    inner: Arc<SettingsInner>,
}

impl Deref for Settings {
    type Target = SettingsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Settings {
    fn deref_mut(&mut self) -> &mut SettingsInner {
        Arc::make_mut(&mut self.inner)
    }
}

impl From<SettingsInner> for Settings {
    fn from(inner: SettingsInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}
