//! Core handles and the structural type representation.
//!
//! Every entity the solver works with is a `u32` handle into an arena:
//! classes and type parameters live in the class table, type expressions in
//! the `TypeInterner`. Handles compare by value, and because each arena hands
//! out every handle exactly once, value equality is identity.

use lineage_common::interner::Atom;

/// A nominal class in the hierarchy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

/// A declared type parameter.
///
/// Two classes that both declare `T` own two distinct `TypeParamId`s; the
/// name is only carried for display.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeParamId(pub u32);

/// An interned type expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

/// An interned, ordered list of type expressions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeListId(pub u32);

impl TypeListId {
    /// The empty list, pre-registered by every interner.
    pub const EMPTY: Self = Self(0);
}

/// The structural shape of a composite type expression.
///
/// Composites take part in substitution (their members are rewritten) but are
/// otherwise opaque to path finding and resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    /// `Union[A, B, ...]`; members keep their order and are never flattened.
    Union,
    /// `Optional[A]`
    Optional,
    /// `Tuple[A, B, ...]`
    Tuple,
    /// `Callable[[A, B], R]`; the last member is the return type.
    Callable,
    /// A parameterized container that is not a class of the hierarchy,
    /// such as `Iterable[T]`.
    Container(Atom),
}

/// The data behind a `TypeId`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// A plain, unparameterized class.
    Class(ClassId),
    /// A bare, unresolved reference to a type parameter.
    Param(TypeParamId),
    /// A class instantiated with one argument per declared parameter.
    Application { origin: ClassId, args: TypeListId },
    /// Any other structural expression.
    Composite {
        kind: CompositeKind,
        members: TypeListId,
    },
}

/// One element of an inheritance path.
///
/// With generics enabled the path alternates between specialization edges
/// (`Application`) and the classes they instantiate (`Class`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathNode {
    Class(ClassId),
    Application(TypeId),
}

impl PathNode {
    /// The class behind this node, if it is a plain class.
    pub fn as_class(self) -> Option<ClassId> {
        match self {
            PathNode::Class(class) => Some(class),
            PathNode::Application(_) => None,
        }
    }

    pub fn is_application(self) -> bool {
        matches!(self, PathNode::Application(_))
    }
}

impl From<ClassId> for PathNode {
    fn from(class: ClassId) -> Self {
        PathNode::Class(class)
    }
}

/// How concrete a resolved binding is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// No type parameter remains.
    Concrete,
    /// Still a bare parameter: the descendant stays generic over this position.
    Free,
    /// A composite or application mixing parameters with concrete structure.
    Partial,
}

impl BindingKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            BindingKind::Concrete => "concrete",
            BindingKind::Free => "free",
            BindingKind::Partial => "partial",
        }
    }
}
