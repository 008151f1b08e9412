use crate::error::{ConfigurationError, ConfigurationErrorExt};
use sqlmap_domain::{CacheScope, Settings};
use sqlmap_reflection::{BoundedCache, ClassMetadata, Reflect, ReflectorFactory};
use sqlmap_registry::StrictRegistry;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub const MAPPED_STATEMENTS: &str = "Mapped Statements collection";
pub const CACHES: &str = "Caches collection";
pub const RESULT_MAPS: &str = "Result Maps collection";

/// A named configuration element together with the resource that declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedArtifact {
    id: String,
    resource: String,
}

impl MappedArtifact {
    pub fn new(id: impl Into<String>, resource: impl Into<String>) -> Self {
        Self { id: id.into(), resource: resource.into() }
    }

    /// Namespace-qualified id, e.g. `blog.BlogMapper.selectBlog`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

type Artifacts = StrictRegistry<Arc<MappedArtifact>>;

/// Everything assembled while loading mapper configuration.
///
/// Built single-threaded through `&mut self`, then shared read-only.
#[derive(Debug)]
pub struct Configuration {
    settings: Settings,
    reflector_factory: Arc<ReflectorFactory>,
    mapped_statements: Artifacts,
    caches: Artifacts,
    result_maps: Artifacts,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Configuration {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let reflector_factory = settings.class_cache_capacity.map_or_else(ReflectorFactory::new, |capacity| {
            ReflectorFactory::with_cache(Arc::new(BoundedCache::new(capacity)))
        });
        reflector_factory.set_class_cache_enabled(settings.class_cache_enabled);

        debug!(
            class_cache_enabled = settings.class_cache_enabled,
            class_cache_capacity = ?settings.class_cache_capacity,
            local_cache_scope = %settings.local_cache_scope,
            "Configuration created"
        );

        Self {
            settings,
            reflector_factory: Arc::new(reflector_factory),
            mapped_statements: StrictRegistry::new(MAPPED_STATEMENTS).with_conflict_message_producer(
                |saved: &Arc<MappedArtifact>, target: &Arc<MappedArtifact>| {
                    format!(". please check {} and {}", saved.resource, target.resource)
                },
            ),
            caches: StrictRegistry::new(CACHES),
            result_maps: StrictRegistry::new(RESULT_MAPS),
        }
    }

    /// Reads settings from `path` (plus `SQLMAP__*` overrides) and builds a configuration.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::Settings`] if the settings cannot be loaded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let settings = sqlmap_kernel::config::load_settings(Some(path))
            .context(format!("Loading {}", path.display()))?;
        info!(path = %path.display(), "Configuration settings loaded");
        Ok(Self::new(settings))
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn local_cache_scope(&self) -> CacheScope {
        self.settings.local_cache_scope
    }

    #[must_use]
    pub const fn reflector_factory(&self) -> &Arc<ReflectorFactory> {
        &self.reflector_factory
    }

    /// Class metadata through the shared reflector factory.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::Reflection`] if `T` cannot be introspected.
    pub fn metadata_for<T: Reflect>(&self) -> Result<Arc<ClassMetadata>, ConfigurationError> {
        Ok(self.reflector_factory.find_for_class::<T>()?)
    }

    /// # Errors
    /// Returns [`ConfigurationError::Registry`] if the statement id is already registered.
    pub fn add_mapped_statement(&mut self, statement: MappedArtifact) -> Result<(), ConfigurationError> {
        Ok(self.mapped_statements.put(statement.id.clone(), Arc::new(statement))?)
    }

    /// Looks a statement up by full id or unambiguous short id.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::Registry`] if the id is unknown or ambiguous.
    pub fn mapped_statement(&self, id: &str) -> Result<&Arc<MappedArtifact>, ConfigurationError> {
        Ok(self.mapped_statements.get(id)?)
    }

    /// Whether `id` names a statement slot, ambiguous short ids included.
    #[must_use]
    pub fn has_statement(&self, id: &str) -> bool {
        self.mapped_statements.contains_key(id)
    }

    /// # Errors
    /// Returns [`ConfigurationError::Registry`] if the cache id is already registered.
    pub fn add_cache(&mut self, cache: MappedArtifact) -> Result<(), ConfigurationError> {
        Ok(self.caches.put(cache.id.clone(), Arc::new(cache))?)
    }

    /// # Errors
    /// Returns [`ConfigurationError::Registry`] if the id is unknown or ambiguous.
    pub fn cache(&self, id: &str) -> Result<&Arc<MappedArtifact>, ConfigurationError> {
        Ok(self.caches.get(id)?)
    }

    /// # Errors
    /// Returns [`ConfigurationError::Registry`] if the result map id is already registered.
    pub fn add_result_map(&mut self, result_map: MappedArtifact) -> Result<(), ConfigurationError> {
        Ok(self.result_maps.put(result_map.id.clone(), Arc::new(result_map))?)
    }

    /// # Errors
    /// Returns [`ConfigurationError::Registry`] if the id is unknown or ambiguous.
    pub fn result_map(&self, id: &str) -> Result<&Arc<MappedArtifact>, ConfigurationError> {
        Ok(self.result_maps.get(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlmap_domain::SettingsInner;

    #[test]
    fn settings_drive_the_reflector_factory() {
        let settings =
            Settings::from(SettingsInner { class_cache_enabled: false, ..SettingsInner::default() });
        let configuration = Configuration::new(settings);

        assert!(!configuration.reflector_factory().is_class_cache_enabled());
        assert_eq!(configuration.local_cache_scope(), CacheScope::Session);
    }

    #[test]
    fn registries_carry_their_names() {
        let configuration = Configuration::default();

        assert_eq!(configuration.mapped_statements.name(), MAPPED_STATEMENTS);
        assert_eq!(configuration.caches.name(), CACHES);
        assert_eq!(configuration.result_maps.name(), RESULT_MAPS);
    }
}
