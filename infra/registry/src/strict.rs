use crate::error::RegistryError;
use fxhash::{FxHashMap, FxHashSet};
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, warn};

const NAMESPACE_SEPARATOR: char = '.';

type ConflictMessage<V> = Box<dyn Fn(&V, &V) -> String + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot<V> {
    Value(V),
    Ambiguous(String),
}

/// Append-only map from namespace-qualified names to values.
///
/// Every value is stored under its full name. A full name containing `.` also publishes
/// its last segment as a short key, which resolves while exactly one full name produces
/// it and becomes permanently ambiguous once a second one does.
///
/// Writes take `&mut self`; a registry is built once and then shared for reading.
pub struct StrictRegistry<V> {
    name: Cow<'static, str>,
    slots: FxHashMap<String, Slot<V>>,
    full_names: FxHashSet<String>,
    conflict_message: Option<ConflictMessage<V>>,
}

impl<V: Clone> StrictRegistry<V> {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            slots: FxHashMap::default(),
            full_names: FxHashSet::default(),
            conflict_message: None,
        }
    }

    /// Enriches duplicate errors with details of the saved and the rejected value.
    #[must_use]
    pub fn with_conflict_message_producer(
        mut self,
        producer: impl Fn(&V, &V) -> String + Send + Sync + 'static,
    ) -> Self {
        self.conflict_message = Some(Box::new(producer));
        self
    }

    /// Registers `value` under `full_name` and its derived short key.
    ///
    /// A full name always takes its slot, even when a shorter entry already published the
    /// same string as a derived short key: `put("select")` after `put("a.select")` succeeds
    /// and shadows the alias.
    ///
    /// # Errors
    /// Returns [`RegistryError::Duplicate`] if `full_name` is already registered.
    pub fn put(&mut self, full_name: impl Into<String>, value: V) -> Result<(), RegistryError> {
        let full_name = full_name.into();
        if self.full_names.contains(&full_name) {
            let detail = match (&self.conflict_message, self.slots.get(&full_name)) {
                (Some(produce), Some(Slot::Value(saved))) => produce(saved, &value),
                _ => String::new(),
            };
            return Err(RegistryError::Duplicate {
                registry: self.name.clone(),
                key: full_name,
                detail,
                context: None,
            });
        }

        if let Some(short) = short_key(&full_name)
            && !self.full_names.contains(short)
        {
            let slot = match self.slots.get(short) {
                None => Slot::Value(value.clone()),
                Some(_) => {
                    warn!(registry = %self.name, key = short, %full_name, "Short name is now ambiguous");
                    Slot::Ambiguous(short.to_owned())
                },
            };
            self.slots.insert(short.to_owned(), slot);
        }

        debug!(registry = %self.name, %full_name, "Registered entry");
        self.slots.insert(full_name.clone(), Slot::Value(value));
        self.full_names.insert(full_name);
        Ok(())
    }

    /// Resolves a full name or a short key.
    ///
    /// # Errors
    /// Returns [`RegistryError::NotFound`] for unknown keys and
    /// [`RegistryError::Ambiguous`] for short keys shared by several full names.
    pub fn get(&self, key: &str) -> Result<&V, RegistryError> {
        match self.slots.get(key) {
            Some(Slot::Value(value)) => Ok(value),
            Some(Slot::Ambiguous(subject)) => Err(RegistryError::Ambiguous {
                registry: self.name.clone(),
                key: subject.clone(),
                context: None,
            }),
            None => Err(RegistryError::NotFound { registry: self.name.clone(), key: key.to_owned(), context: None }),
        }
    }

    /// Number of entries: full names, derived short keys, and one extra slot per ambiguity
    /// marker, so `a.b.select` plus `c.select` gives 4.
    #[must_use]
    pub fn size(&self) -> usize {
        let markers = self.slots.values().filter(|slot| matches!(slot, Slot::Ambiguous(_))).count();
        self.slots.len() + markers
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `key` occupies a slot, including ambiguous short keys.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    #[must_use]
    pub fn contains_full_name(&self, name: &str) -> bool {
        self.full_names.contains(name)
    }
}

impl<V> fmt::Debug for StrictRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrictRegistry")
            .field("name", &self.name)
            .field("slots", &self.slots.len())
            .field("full_names", &self.full_names.len())
            .field("conflict_message", &self.conflict_message.is_some())
            .finish()
    }
}

/// The last namespace segment, for names that have one.
///
/// Names without a separator and names ending in one (`"a.b."`) publish no short key; an
/// empty alias would be reachable only by `get("")`.
fn short_key(full_name: &str) -> Option<&str> {
    full_name
        .rsplit_once(NAMESPACE_SEPARATOR)
        .map(|(_, short)| short)
        .filter(|short| !short.is_empty())
}
