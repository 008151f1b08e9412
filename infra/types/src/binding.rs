use crate::error::TypeError;
use crate::hierarchy::{ClassDecl, SuperType};
use std::fmt;
use tracing::debug;

/// The parameterized base every type handler ultimately extends.
pub static TYPE_REFERENCE: ClassDecl = ClassDecl::root("TypeReference");

/// Guards the superclass walk against cyclic declarations.
const MAX_HIERARCHY_DEPTH: usize = 64;

/// The concrete type argument a subclass binds on its parameterized base.
///
/// Computed once when the owning object is constructed and held immutably afterwards.
///
/// ```rust
/// use sqlmap_types::{ClassDecl, GenericTypeBinding, TYPE_REFERENCE, TypeExpr};
///
/// static LONG: ClassDecl = ClassDecl::root("java.lang.Long");
/// static LONG_ARG: [TypeExpr; 1] = [TypeExpr::Class(&LONG)];
/// static ID_HANDLER: ClassDecl = ClassDecl::extends_generic("IdHandler", &TYPE_REFERENCE, &LONG_ARG);
///
/// let binding = GenericTypeBinding::resolve(&ID_HANDLER)?;
/// assert_eq!(binding.raw_type(), &LONG);
/// assert_eq!(binding.to_string(), "java.lang.Long");
/// # Ok::<(), sqlmap_types::TypeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericTypeBinding {
    subclass: &'static ClassDecl,
    raw_type: &'static ClassDecl,
}

impl GenericTypeBinding {
    /// Resolves the type argument `subclass` binds on [`TYPE_REFERENCE`].
    ///
    /// # Errors
    /// * [`TypeError::MissingTypeParameter`] if the chain reaches the base (or the hierarchy
    ///   root) without a parameterized declaration.
    /// * [`TypeError::InvalidHierarchy`] if the chain does not terminate.
    pub fn resolve(subclass: &'static ClassDecl) -> Result<Self, TypeError> {
        Self::resolve_against(subclass, &TYPE_REFERENCE)
    }

    /// Resolves the first type argument found while climbing from `subclass` towards `base`.
    ///
    /// A raw intermediate superclass continues the climb; a parameterized one ends it. A
    /// parameterized argument is reduced to its raw class.
    ///
    /// # Errors
    /// See [`GenericTypeBinding::resolve`].
    pub fn resolve_against(
        subclass: &'static ClassDecl,
        base: &'static ClassDecl,
    ) -> Result<Self, TypeError> {
        let missing = |context: &'static str| TypeError::MissingTypeParameter {
            class: subclass.name().into(),
            base: base.name().into(),
            context: Some(context.into()),
        };

        let mut current = subclass;
        for _ in 0..MAX_HIERARCHY_DEPTH {
            match current.superclass() {
                None => return Err(missing("hierarchy root reached")),
                Some(SuperType::Raw(parent)) if parent == base => {
                    return Err(missing("base extended without arguments"));
                },
                Some(SuperType::Raw(parent)) => current = parent,
                Some(SuperType::Parameterized(_, args)) => {
                    let Some(first) = args.first() else {
                        return Err(missing("empty type argument list"));
                    };
                    let raw_type = first.raw();
                    debug!(class = subclass.name(), raw_type = raw_type.name(), "Resolved type argument");
                    return Ok(Self { subclass, raw_type });
                },
            }
        }

        Err(TypeError::InvalidHierarchy {
            message: format!("'{}' exceeds {MAX_HIERARCHY_DEPTH} superclass levels", subclass.name())
                .into(),
            context: Some("possible cyclic declaration".into()),
        })
    }

    /// The resolved type argument, stripped of its own parameters.
    #[must_use]
    pub const fn raw_type(&self) -> &'static ClassDecl {
        self.raw_type
    }

    /// The class the resolution started from.
    #[must_use]
    pub const fn subclass(&self) -> &'static ClassDecl {
        self.subclass
    }
}

impl fmt::Display for GenericTypeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_type)
    }
}
