//! Static class-hierarchy descriptions.
//!
//! Rust has no runtime view of a type's generic superclass, so types that take part in
//! generic resolution describe their ancestry with `static` [`ClassDecl`] items:
//!
//! ```rust
//! use sqlmap_types::{ClassDecl, TYPE_REFERENCE, TypeExpr};
//!
//! static STRING: ClassDecl = ClassDecl::root("java.lang.String");
//! static STRING_ARG: [TypeExpr; 1] = [TypeExpr::Class(&STRING)];
//! static NAME_HANDLER: ClassDecl =
//!     ClassDecl::extends_generic("NameHandler", &TYPE_REFERENCE, &STRING_ARG);
//!
//! assert_eq!(NAME_HANDLER.superclass().map(|s| s.raw().name()), Some("TypeReference"));
//! ```

use std::fmt;

/// A declared class: its name and, optionally, how it extends its superclass.
///
/// Identity is the class name; declarations are expected to use fully qualified names.
#[derive(Debug)]
pub struct ClassDecl {
    name: &'static str,
    superclass: Option<SuperType>,
}

/// How a class refers to its direct superclass.
#[derive(Debug, Clone, Copy)]
pub enum SuperType {
    /// `extends Base` (no type arguments).
    Raw(&'static ClassDecl),
    /// `extends Base<A, B, ...>`.
    Parameterized(&'static ClassDecl, &'static [TypeExpr]),
}

/// A type argument as written at the declaration site.
#[derive(Debug, Clone, Copy)]
pub enum TypeExpr {
    Class(&'static ClassDecl),
    Parameterized(&'static ClassDecl, &'static [TypeExpr]),
}

impl ClassDecl {
    /// A class with no declared superclass.
    #[must_use]
    pub const fn root(name: &'static str) -> Self {
        Self { name, superclass: None }
    }

    /// A class extending `parent` without type arguments.
    #[must_use]
    pub const fn extends(name: &'static str, parent: &'static Self) -> Self {
        Self { name, superclass: Some(SuperType::Raw(parent)) }
    }

    /// A class extending a parameterized `parent`.
    #[must_use]
    pub const fn extends_generic(
        name: &'static str,
        parent: &'static Self,
        args: &'static [TypeExpr],
    ) -> Self {
        Self { name, superclass: Some(SuperType::Parameterized(parent, args)) }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn superclass(&self) -> Option<SuperType> {
        self.superclass
    }
}

impl PartialEq for ClassDecl {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ClassDecl {}

impl fmt::Display for ClassDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl SuperType {
    /// The superclass without its type arguments.
    #[must_use]
    pub const fn raw(&self) -> &'static ClassDecl {
        match self {
            Self::Raw(class) | Self::Parameterized(class, _) => *class,
        }
    }
}

impl TypeExpr {
    /// Strips any parameterization, keeping only the raw class.
    #[must_use]
    pub const fn raw(&self) -> &'static ClassDecl {
        match self {
            Self::Class(class) | Self::Parameterized(class, _) => *class,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(class) => write!(f, "{class}"),
            Self::Parameterized(class, args) => {
                write!(f, "{class}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            },
        }
    }
}
