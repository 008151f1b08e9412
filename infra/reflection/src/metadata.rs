//! Validated, immutable per-class property metadata.

use crate::error::ReflectionError;
use crate::shape::{BoxedValue, ClassId, ClassShape, Constructor, Getter, Setter};
use fxhash::FxHashMap;
use std::any::Any;
use std::borrow::Cow;

#[derive(Debug, Clone)]
struct Property {
    ty: ClassId,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

/// Introspection result for one class.
///
/// Built once by [`ClassMetadata::introspect`] and never mutated afterwards, so it is
/// shared freely between threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ClassMetadata {
    class: ClassId,
    readable: Vec<String>,
    writable: Vec<String>,
    properties: FxHashMap<String, Property>,
    case_insensitive: FxHashMap<String, String>,
    constructor: Option<Constructor>,
}

impl ClassMetadata {
    /// Validates a raw shape and indexes its properties.
    ///
    /// # Errors
    /// Returns [`ReflectionError::Introspection`] when a property name is empty, declared
    /// twice for the same accessor, declared with conflicting types, clashes with another
    /// name ignoring case, or when an accessor or the constructor belongs to another class.
    pub fn introspect(shape: ClassShape) -> Result<Self, ReflectionError> {
        let (class, declared, constructor) = shape.into_parts();
        let fail = |message: String| ReflectionError::Introspection {
            class: Cow::Borrowed(class.name()),
            message: message.into(),
            context: None,
        };

        let mut properties: FxHashMap<String, Property> = FxHashMap::default();
        for decl in declared {
            let (name, ty, getter, setter) = decl.into_parts();
            if name.is_empty() {
                return Err(fail("property name must not be empty".to_owned()));
            }
            let mut owners = getter.iter().map(Getter::owner).chain(setter.iter().map(Setter::owner));
            if let Some(owner) = owners.find(|owner| *owner != class) {
                return Err(fail(format!("accessor for '{name}' belongs to '{owner}'")));
            }

            let entry = properties
                .entry(name.clone().into_owned())
                .or_insert(Property { ty, getter: None, setter: None });
            if entry.ty != ty {
                return Err(fail(format!(
                    "property '{name}' is declared as both '{}' and '{ty}'",
                    entry.ty
                )));
            }
            if let Some(getter) = getter {
                if entry.getter.is_some() {
                    return Err(fail(format!("ambiguous getter for property '{name}'")));
                }
                entry.getter = Some(getter);
            }
            if let Some(setter) = setter {
                if entry.setter.is_some() {
                    return Err(fail(format!("ambiguous setter for property '{name}'")));
                }
                entry.setter = Some(setter);
            }
        }

        if let Some(ctor) = &constructor
            && ctor.class() != class
        {
            return Err(fail(format!("default constructor creates '{}'", ctor.class())));
        }

        let mut readable: Vec<String> =
            properties.iter().filter(|(_, p)| p.getter.is_some()).map(|(n, _)| n.clone()).collect();
        let mut writable: Vec<String> =
            properties.iter().filter(|(_, p)| p.setter.is_some()).map(|(n, _)| n.clone()).collect();
        readable.sort_unstable();
        writable.sort_unstable();

        let mut names: Vec<&String> = properties.keys().collect();
        names.sort_unstable();
        let mut case_insensitive: FxHashMap<String, String> = FxHashMap::default();
        for name in names {
            if let Some(taken) = case_insensitive.insert(name.to_uppercase(), name.clone()) {
                return Err(fail(format!("properties '{taken}' and '{name}' differ only in letter case")));
            }
        }

        Ok(Self { class, readable, writable, properties, case_insensitive, constructor })
    }

    #[must_use]
    pub const fn class(&self) -> ClassId {
        self.class
    }

    /// Names of all properties with a getter, sorted.
    #[must_use]
    pub fn readable_property_names(&self) -> &[String] {
        &self.readable
    }

    /// Names of all properties with a setter, sorted.
    #[must_use]
    pub fn writable_property_names(&self) -> &[String] {
        &self.writable
    }

    #[must_use]
    pub fn has_getter(&self, name: &str) -> bool {
        self.properties.get(name).is_some_and(|p| p.getter.is_some())
    }

    #[must_use]
    pub fn has_setter(&self, name: &str) -> bool {
        self.properties.get(name).is_some_and(|p| p.setter.is_some())
    }

    /// # Errors
    /// Returns [`ReflectionError::PropertyNotFound`] if `name` is not readable.
    pub fn getter(&self, name: &str) -> Result<&Getter, ReflectionError> {
        self.properties.get(name).and_then(|p| p.getter.as_ref()).ok_or_else(|| self.missing(name, "getter"))
    }

    /// # Errors
    /// Returns [`ReflectionError::PropertyNotFound`] if `name` is not writable.
    pub fn setter(&self, name: &str) -> Result<&Setter, ReflectionError> {
        self.properties.get(name).and_then(|p| p.setter.as_ref()).ok_or_else(|| self.missing(name, "setter"))
    }

    /// # Errors
    /// Returns [`ReflectionError::PropertyNotFound`] if `name` is not readable.
    pub fn getter_type(&self, name: &str) -> Result<ClassId, ReflectionError> {
        self.getter(name).map(Getter::property_type)
    }

    /// # Errors
    /// Returns [`ReflectionError::PropertyNotFound`] if `name` is not writable.
    pub fn setter_type(&self, name: &str) -> Result<ClassId, ReflectionError> {
        self.setter(name).map(Setter::property_type)
    }

    /// Reads `name` from `target` and downcasts it to `F`.
    ///
    /// # Errors
    /// Fails if the property is not readable or the invocation fails.
    pub fn get_value<F: 'static>(&self, target: &dyn Any, name: &str) -> Result<F, ReflectionError> {
        self.getter(name)?.get(target)
    }

    /// # Errors
    /// Fails if the property is not writable or the invocation fails.
    pub fn set_value<F: Send + 'static>(
        &self,
        target: &mut dyn Any,
        name: &str,
        value: F,
    ) -> Result<(), ReflectionError> {
        self.setter(name)?.set(target, value)
    }

    #[must_use]
    pub const fn has_default_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// # Errors
    /// Returns [`ReflectionError::Introspection`] if the class has no default constructor.
    pub fn default_constructor(&self) -> Result<&Constructor, ReflectionError> {
        self.constructor.as_ref().ok_or_else(|| ReflectionError::Introspection {
            class: Cow::Borrowed(self.class.name()),
            message: format!("There is no default constructor for {}", self.class).into(),
            context: None,
        })
    }

    /// # Errors
    /// Returns [`ReflectionError::Introspection`] if the class has no default constructor.
    pub fn instantiate(&self) -> Result<BoxedValue, ReflectionError> {
        self.default_constructor().map(Constructor::instantiate)
    }

    /// Maps a property name in any letter case to its declared spelling.
    #[must_use]
    pub fn find_property_name(&self, name: &str) -> Option<&str> {
        self.case_insensitive.get(&name.to_uppercase()).map(String::as_str)
    }

    fn missing(&self, name: &str, accessor: &'static str) -> ReflectionError {
        ReflectionError::PropertyNotFound {
            class: Cow::Borrowed(self.class.name()),
            property: name.to_owned(),
            accessor,
            context: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::PropertyDecl;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Author {
        id: i64,
        user_name: String,
        active: bool,
    }

    #[derive(Debug, Default)]
    struct Other {
        id: i64,
    }

    fn author_shape() -> ClassShape {
        ClassShape::of::<Author>()
            .property(PropertyDecl::read_write::<Author, i64>("id", |a| &a.id, |a| &mut a.id))
            .property(PropertyDecl::read_only::<Author, String>("userName", |a| &a.user_name))
            .property(PropertyDecl::write_only::<Author, bool>("active", |a| &mut a.active))
            .constructor(Constructor::of_default::<Author>())
    }

    #[test]
    fn indexes_readable_and_writable_names_sorted() {
        let meta = ClassMetadata::introspect(author_shape()).unwrap();

        assert_eq!(meta.readable_property_names(), ["id", "userName"]);
        assert_eq!(meta.writable_property_names(), ["active", "id"]);
        assert!(meta.has_getter("userName"));
        assert!(!meta.has_setter("userName"));
        assert!(!meta.has_getter("active"));
    }

    #[test]
    fn get_and_set_through_accessors() {
        let meta = ClassMetadata::introspect(author_shape()).unwrap();
        let mut author = Author { id: 1, user_name: "jdoe".to_owned(), active: false };

        meta.set_value(&mut author, "id", 9_i64).unwrap();
        meta.set_value(&mut author, "active", true).unwrap();

        assert_eq!(meta.get_value::<i64>(&author, "id").unwrap(), 9);
        assert_eq!(meta.get_value::<String>(&author, "userName").unwrap(), "jdoe");
        assert!(author.active);
    }

    #[test]
    fn wrong_value_type_is_an_invocation_error() {
        let meta = ClassMetadata::introspect(author_shape()).unwrap();
        let mut author = Author::default();

        let err = meta.set_value(&mut author, "id", "nine").unwrap_err();
        assert!(matches!(err, ReflectionError::Invocation { .. }));
        assert_eq!(author.id, 0);

        let err = meta.get_value::<u8>(&author, "id").unwrap_err();
        assert!(matches!(err, ReflectionError::Invocation { .. }));
    }

    #[test]
    fn wrong_target_is_an_invocation_error() {
        let meta = ClassMetadata::introspect(author_shape()).unwrap();
        let err = meta.get_value::<i64>(&Other::default(), "id").unwrap_err();
        assert!(err.to_string().contains("is not an instance of"));
    }

    #[test]
    fn missing_property_names_the_class() {
        let meta = ClassMetadata::introspect(author_shape()).unwrap();
        let err = meta.getter("nickname").unwrap_err();

        assert!(matches!(err, ReflectionError::PropertyNotFound { accessor: "getter", .. }));
        assert!(err.to_string().starts_with("There is no getter for property named 'nickname' in '"));
        assert!(meta.setter_type("userName").is_err());
    }

    #[test]
    fn property_types_are_reported() {
        let meta = ClassMetadata::introspect(author_shape()).unwrap();
        assert_eq!(meta.getter_type("id").unwrap(), ClassId::of::<i64>());
        assert_eq!(meta.setter_type("active").unwrap(), ClassId::of::<bool>());
    }

    #[test]
    fn finds_property_names_ignoring_case() {
        let meta = ClassMetadata::introspect(author_shape()).unwrap();

        assert_eq!(meta.find_property_name("USERNAME"), Some("userName"));
        assert_eq!(meta.find_property_name("Id"), Some("id"));
        assert_eq!(meta.find_property_name("user_name"), None);
    }

    #[test]
    fn instantiates_through_default_constructor() {
        let meta = ClassMetadata::introspect(author_shape()).unwrap();
        let created = meta.instantiate().unwrap();
        assert_eq!(created.downcast_ref::<Author>(), Some(&Author::default()));
    }

    #[test]
    fn missing_constructor_is_reported_on_use() {
        let shape = ClassShape::of::<Other>()
            .property(PropertyDecl::read_write::<Other, i64>("id", |o| &o.id, |o| &mut o.id));
        let meta = ClassMetadata::introspect(shape).unwrap();

        assert!(!meta.has_default_constructor());
        let err = meta.instantiate().unwrap_err();
        assert!(err.to_string().contains("There is no default constructor for"));
    }

    #[test]
    fn rejects_duplicate_getters() {
        let shape = author_shape().property(PropertyDecl::read_only::<Author, i64>("id", |a| &a.id));
        let err = ClassMetadata::introspect(shape).unwrap_err();
        assert!(err.to_string().contains("ambiguous getter for property 'id'"));
    }

    #[test]
    fn rejects_conflicting_types() {
        let shape = ClassShape::of::<Author>()
            .property(PropertyDecl::read_only::<Author, i64>("id", |a| &a.id))
            .property(PropertyDecl::write_only::<Author, bool>("id", |a| &mut a.active));
        let err = ClassMetadata::introspect(shape).unwrap_err();
        assert!(matches!(err, ReflectionError::Introspection { .. }));
    }

    #[test]
    fn rejects_foreign_accessors_and_constructors() {
        let shape = ClassShape::of::<Author>()
            .property(PropertyDecl::read_only::<Other, i64>("id", |o| &o.id));
        assert!(ClassMetadata::introspect(shape).is_err());

        let shape = ClassShape::of::<Author>().constructor(Constructor::of_default::<Other>());
        assert!(ClassMetadata::introspect(shape).is_err());
    }

    #[test]
    fn rejects_names_differing_only_in_case() {
        let shape = ClassShape::of::<Author>()
            .property(PropertyDecl::read_only::<Author, i64>("id", |a| &a.id))
            .property(PropertyDecl::read_only::<Author, String>("ID", |a| &a.user_name));
        let err = ClassMetadata::introspect(shape).unwrap_err();

        assert!(matches!(err, ReflectionError::Introspection { .. }));
        assert!(err.to_string().contains("properties 'ID' and 'id' differ only in letter case"));
    }

    #[test]
    fn rejects_empty_names() {
        let shape = ClassShape::of::<Author>()
            .property(PropertyDecl::read_only::<Author, i64>("", |a| &a.id));
        assert!(ClassMetadata::introspect(shape).is_err());
    }
}
