use crate::cache::{MemoryCache, MetadataCache, NoopCache};
use crate::error::ReflectionError;
use crate::metadata::ClassMetadata;
use crate::shape::{ClassId, ClassShape, Reflect};
use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

/// Process-wide entry point for class metadata.
///
/// While caching is enabled, every lookup for the same class yields the same `Arc`.
/// Disabling the cache makes every lookup introspect afresh without evicting what was
/// stored, so re-enabling it serves the earlier entries again.
#[derive(Debug)]
pub struct ReflectorFactory {
    cache: Arc<dyn MetadataCache>,
    enabled: AtomicBool,
    introspections: AtomicU64,
}

impl Default for ReflectorFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ReflectorFactory {
    /// A factory backed by an unbounded [`MemoryCache`], with caching enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache(Arc::new(MemoryCache::new()))
    }

    #[must_use]
    pub fn with_cache(cache: Arc<dyn MetadataCache>) -> Self {
        Self { cache, enabled: AtomicBool::new(true), introspections: AtomicU64::new(0) }
    }

    pub fn is_class_cache_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn set_class_cache_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
        debug!(enabled, "Class metadata cache toggled");
    }

    /// Metadata for a type implementing [`Reflect`].
    ///
    /// # Errors
    /// Returns [`ReflectionError::Introspection`] if the type's shape is invalid.
    pub fn find_for_class<T: Reflect>(&self) -> Result<Arc<ClassMetadata>, ReflectionError> {
        self.find_for_shape(ClassId::of::<T>(), T::class_shape)
    }

    /// Metadata for `class`, computed from `shape` on a miss.
    ///
    /// # Errors
    /// Returns [`ReflectionError::Introspection`] if the shape is invalid or describes a
    /// different class.
    pub fn find_for_shape(
        &self,
        class: ClassId,
        shape: impl Fn() -> ClassShape,
    ) -> Result<Arc<ClassMetadata>, ReflectionError> {
        let mut compute = || {
            self.introspections.fetch_add(1, Ordering::Relaxed);
            let shape = shape();
            if shape.class() != class {
                return Err(ReflectionError::Introspection {
                    class: Cow::Borrowed(class.name()),
                    message: format!("shape describes '{}'", shape.class()).into(),
                    context: None,
                });
            }
            debug!(%class, "Introspecting class");
            ClassMetadata::introspect(shape)
        };

        self.active_cache().get_or_compute(class, &mut compute)
    }

    /// Total introspections performed, cached or not.
    pub fn introspections(&self) -> u64 {
        self.introspections.load(Ordering::Relaxed)
    }

    /// Number of classes held by the backing cache.
    pub fn cached_classes(&self) -> usize {
        self.cache.len()
    }

    fn active_cache(&self) -> &dyn MetadataCache {
        if self.is_class_cache_enabled() { self.cache.as_ref() } else { &NoopCache }
    }
}
