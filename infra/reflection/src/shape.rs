//! Raw class descriptions supplied by the types themselves.

use crate::error::ReflectionError;
use std::any::{Any, TypeId, type_name};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A property value moved across the type-erased accessor boundary.
pub type BoxedValue = Box<dyn Any + Send>;

/// Runtime identity of a type; equality and hashing use the [`TypeId`] only.
#[derive(Clone, Copy)]
pub struct ClassId {
    id: TypeId,
    name: &'static str,
}

impl ClassId {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: type_name::<T>() }
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ClassId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClassId {}

impl Hash for ClassId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassId").field(&self.name).finish()
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

type ReadFn = dyn Fn(&dyn Any) -> Option<BoxedValue> + Send + Sync;
type WriteFn = dyn Fn(&mut dyn Any, BoxedValue) -> Result<(), WriteFailure> + Send + Sync;

enum WriteFailure {
    Target,
    Value,
}

/// A resolved read accessor. Returns an owned copy of the property value.
#[derive(Clone)]
pub struct Getter {
    owner: ClassId,
    ty: ClassId,
    read: Arc<ReadFn>,
}

impl Getter {
    #[must_use]
    pub const fn owner(&self) -> ClassId {
        self.owner
    }

    #[must_use]
    pub const fn property_type(&self) -> ClassId {
        self.ty
    }

    /// # Errors
    /// Returns [`ReflectionError::Invocation`] if `target` is not an instance of the owner.
    pub fn invoke(&self, target: &dyn Any) -> Result<BoxedValue, ReflectionError> {
        (self.read)(target).ok_or_else(|| wrong_target(self.owner))
    }

    /// Reads the value and downcasts it to `F`.
    ///
    /// # Errors
    /// Returns [`ReflectionError::Invocation`] on a wrong target or a wrong `F`.
    pub fn get<F: 'static>(&self, target: &dyn Any) -> Result<F, ReflectionError> {
        self.invoke(target)?.downcast::<F>().map(|v| *v).map_err(|_| ReflectionError::Invocation {
            message: format!("property of type '{}' read as '{}'", self.ty, type_name::<F>()).into(),
            context: None,
        })
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Getter").field("owner", &self.owner).field("type", &self.ty).finish_non_exhaustive()
    }
}

/// A resolved write accessor.
#[derive(Clone)]
pub struct Setter {
    owner: ClassId,
    ty: ClassId,
    write: Arc<WriteFn>,
}

impl Setter {
    #[must_use]
    pub const fn owner(&self) -> ClassId {
        self.owner
    }

    #[must_use]
    pub const fn property_type(&self) -> ClassId {
        self.ty
    }

    /// # Errors
    /// Returns [`ReflectionError::Invocation`] on a wrong target or a value of the wrong type.
    pub fn invoke(&self, target: &mut dyn Any, value: BoxedValue) -> Result<(), ReflectionError> {
        (self.write)(target, value).map_err(|failure| match failure {
            WriteFailure::Target => wrong_target(self.owner),
            WriteFailure::Value => ReflectionError::Invocation {
                message: format!("value is not a '{}'", self.ty).into(),
                context: Some(format!("writing into '{}'", self.owner).into()),
            },
        })
    }

    /// # Errors
    /// See [`Setter::invoke`].
    pub fn set<F: Send + 'static>(&self, target: &mut dyn Any, value: F) -> Result<(), ReflectionError> {
        self.invoke(target, Box::new(value))
    }
}

impl fmt::Debug for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setter").field("owner", &self.owner).field("type", &self.ty).finish_non_exhaustive()
    }
}

fn wrong_target(owner: ClassId) -> ReflectionError {
    ReflectionError::Invocation {
        message: format!("target is not an instance of '{owner}'").into(),
        context: None,
    }
}

/// A no-argument constructor.
#[derive(Clone, Copy)]
pub struct Constructor {
    class: ClassId,
    create: fn() -> BoxedValue,
}

fn create_default<T: Default + Send + 'static>() -> BoxedValue {
    Box::new(T::default())
}

impl Constructor {
    /// The constructor backed by `T::default()`.
    #[must_use]
    pub fn of_default<T: Default + Send + 'static>() -> Self {
        Self { class: ClassId::of::<T>(), create: create_default::<T> }
    }

    #[must_use]
    pub const fn class(&self) -> ClassId {
        self.class
    }

    #[must_use]
    pub fn instantiate(&self) -> BoxedValue {
        (self.create)()
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor").field("class", &self.class).finish_non_exhaustive()
    }
}

/// One declared property: a name, a type and at least one accessor.
#[derive(Debug, Clone)]
pub struct PropertyDecl {
    name: Cow<'static, str>,
    ty: ClassId,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl PropertyDecl {
    pub fn read_write<T, F>(name: impl Into<Cow<'static, str>>, get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self
    where
        T: 'static,
        F: Clone + Send + 'static,
    {
        Self { name: name.into(), ty: ClassId::of::<F>(), getter: Some(getter(get)), setter: Some(setter(get_mut)) }
    }

    pub fn read_only<T, F>(name: impl Into<Cow<'static, str>>, get: fn(&T) -> &F) -> Self
    where
        T: 'static,
        F: Clone + Send + 'static,
    {
        Self { name: name.into(), ty: ClassId::of::<F>(), getter: Some(getter(get)), setter: None }
    }

    pub fn write_only<T, F>(name: impl Into<Cow<'static, str>>, get_mut: fn(&mut T) -> &mut F) -> Self
    where
        T: 'static,
        F: Send + 'static,
    {
        Self { name: name.into(), ty: ClassId::of::<F>(), getter: None, setter: Some(setter(get_mut)) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn property_type(&self) -> ClassId {
        self.ty
    }

    pub(crate) fn into_parts(self) -> (Cow<'static, str>, ClassId, Option<Getter>, Option<Setter>) {
        (self.name, self.ty, self.getter, self.setter)
    }
}

fn getter<T: 'static, F: Clone + Send + 'static>(get: fn(&T) -> &F) -> Getter {
    Getter {
        owner: ClassId::of::<T>(),
        ty: ClassId::of::<F>(),
        read: Arc::new(move |target: &dyn Any| {
            target.downcast_ref::<T>().map(|t| Box::new(get(t).clone()) as BoxedValue)
        }),
    }
}

fn setter<T: 'static, F: Send + 'static>(get_mut: fn(&mut T) -> &mut F) -> Setter {
    Setter {
        owner: ClassId::of::<T>(),
        ty: ClassId::of::<F>(),
        write: Arc::new(move |target: &mut dyn Any, value: BoxedValue| {
            let target = target.downcast_mut::<T>().ok_or(WriteFailure::Target)?;
            let value = value.downcast::<F>().map_err(|_| WriteFailure::Value)?;
            *get_mut(target) = *value;
            Ok(())
        }),
    }
}

/// Everything a type reveals about itself, before validation.
#[derive(Debug, Clone)]
pub struct ClassShape {
    class: ClassId,
    properties: Vec<PropertyDecl>,
    constructor: Option<Constructor>,
}

impl ClassShape {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self { class: ClassId::of::<T>(), properties: Vec::new(), constructor: None }
    }

    #[must_use]
    pub fn property(mut self, property: PropertyDecl) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub const fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    #[must_use]
    pub const fn class(&self) -> ClassId {
        self.class
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyDecl] {
        &self.properties
    }

    pub(crate) fn into_parts(self) -> (ClassId, Vec<PropertyDecl>, Option<Constructor>) {
        (self.class, self.properties, self.constructor)
    }
}

/// Types that can describe their properties to the reflection cache.
///
/// Usually derived with `#[derive(Reflect)]`; a hand-written impl builds a [`ClassShape`]:
///
/// ```rust
/// use sqlmap_reflection::{ClassShape, PropertyDecl, Reflect};
///
/// struct Counter {
///     hits: u64,
/// }
///
/// impl Reflect for Counter {
///     fn class_shape() -> ClassShape {
///         ClassShape::of::<Self>().property(PropertyDecl::read_only::<Self, u64>("hits", |c| &c.hits))
///     }
/// }
///
/// assert_eq!(Counter::class_shape().properties().len(), 1);
/// ```
pub trait Reflect: 'static {
    fn class_shape() -> ClassShape;
}
