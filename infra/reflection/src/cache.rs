//! Pluggable storage for computed [`ClassMetadata`].

use crate::error::ReflectionError;
use crate::metadata::ClassMetadata;
use crate::shape::ClassId;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Compute-if-absent storage keyed by class identity.
///
/// Implementations must hand every caller the same `Arc` once a class is stored, and must
/// never store a failed computation.
pub trait MetadataCache: fmt::Debug + Send + Sync {
    /// Returns the stored metadata for `class`, running `compute` at most once if absent.
    ///
    /// # Errors
    /// Propagates the error of `compute`; nothing is stored in that case.
    fn get_or_compute(
        &self,
        class: ClassId,
        compute: &mut dyn FnMut() -> Result<ClassMetadata, ReflectionError>,
    ) -> Result<Arc<ClassMetadata>, ReflectionError>;

    /// Number of stored classes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded map behind a read-write lock. Entries live as long as the cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<FxHashMap<ClassId, Arc<ClassMetadata>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataCache for MemoryCache {
    fn get_or_compute(
        &self,
        class: ClassId,
        compute: &mut dyn FnMut() -> Result<ClassMetadata, ReflectionError>,
    ) -> Result<Arc<ClassMetadata>, ReflectionError> {
        if let Some(hit) = self.entries.read().get(&class).cloned() {
            trace!(%class, "Class metadata cache hit");
            return Ok(hit);
        }

        // Computed outside the lock; a racing writer may have stored first and wins.
        let computed = Arc::new(compute()?);
        Ok(Arc::clone(self.entries.write().entry(class).or_insert(computed)))
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

/// Stores nothing; every lookup recomputes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl MetadataCache for NoopCache {
    fn get_or_compute(
        &self,
        _class: ClassId,
        compute: &mut dyn FnMut() -> Result<ClassMetadata, ReflectionError>,
    ) -> Result<Arc<ClassMetadata>, ReflectionError> {
        compute().map(Arc::new)
    }

    fn len(&self) -> usize {
        0
    }
}

/// Size-bounded cache with LRU-style eviction, for hosts reflecting very many classes.
///
/// Concurrent misses for one class are coalesced so `compute` runs once per insertion.
pub struct BoundedCache {
    inner: moka::sync::Cache<ClassId, Arc<ClassMetadata>>,
    capacity: u64,
}

impl BoundedCache {
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self { inner: moka::sync::Cache::new(capacity), capacity }
    }

    #[must_use]
    pub const fn capacity(&self) -> u64 {
        self.capacity
    }
}

impl fmt::Debug for BoundedCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedCache")
            .field("capacity", &self.capacity)
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

impl MetadataCache for BoundedCache {
    fn get_or_compute(
        &self,
        class: ClassId,
        compute: &mut dyn FnMut() -> Result<ClassMetadata, ReflectionError>,
    ) -> Result<Arc<ClassMetadata>, ReflectionError> {
        self.inner.try_get_with(class, || compute().map(Arc::new)).map_err(Arc::unwrap_or_clone)
    }

    fn len(&self) -> usize {
        self.inner.run_pending_tasks();
        usize::try_from(self.inner.entry_count()).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ClassShape;
    use std::borrow::Cow;

    struct Sample;

    fn compute_counting(calls: &mut u32) -> impl FnMut() -> Result<ClassMetadata, ReflectionError> + '_ {
        move || {
            *calls += 1;
            ClassMetadata::introspect(ClassShape::of::<Sample>())
        }
    }

    fn failing() -> Result<ClassMetadata, ReflectionError> {
        Err(ReflectionError::Introspection {
            class: Cow::Borrowed("Sample"),
            message: Cow::Borrowed("broken"),
            context: None,
        })
    }

    #[test]
    fn memory_cache_computes_once() {
        let cache = MemoryCache::new();
        let mut calls = 0;
        let mut compute = compute_counting(&mut calls);

        let first = cache.get_or_compute(ClassId::of::<Sample>(), &mut compute).unwrap();
        let second = cache.get_or_compute(ClassId::of::<Sample>(), &mut compute).unwrap();
        drop(compute);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn noop_cache_always_recomputes() {
        let cache = NoopCache;
        let mut calls = 0;
        let mut compute = compute_counting(&mut calls);

        let first = cache.get_or_compute(ClassId::of::<Sample>(), &mut compute).unwrap();
        let second = cache.get_or_compute(ClassId::of::<Sample>(), &mut compute).unwrap();
        drop(compute);

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(calls, 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn failures_are_not_stored() {
        let memory = MemoryCache::new();
        let bounded = BoundedCache::new(8);

        assert!(memory.get_or_compute(ClassId::of::<Sample>(), &mut failing).is_err());
        assert!(bounded.get_or_compute(ClassId::of::<Sample>(), &mut failing).is_err());
        assert!(memory.is_empty());
        assert!(bounded.is_empty());
    }

    #[test]
    fn bounded_cache_shares_entries() {
        let cache = BoundedCache::new(8);
        let mut calls = 0;
        let mut compute = compute_counting(&mut calls);

        let first = cache.get_or_compute(ClassId::of::<Sample>(), &mut compute).unwrap();
        let second = cache.get_or_compute(ClassId::of::<Sample>(), &mut compute).unwrap();
        drop(compute);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.capacity(), 8);
    }
}
