//! Type shapes, projections and variance
#![allow(
    clippy::min_ident_chars,
    reason = "Ty is the conventional name in type system implementations"
)]

use crate::class_id::ClassId;
use ql_intern::Symbol;

/// A resolved type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// Nominal type: class, interface, object or type alias reference
    ClassLike(ClassLikeType),
    /// Reference to a type parameter in scope
    TypeParameter(TypeParameterType),
    /// Intersection of several types, in source order
    Intersection(Vec<TypeShape>),
    /// Platform type whose nullability or mutability is unknown
    Flexible {
        /// Most specific bound (e.g. `MutableList<T>`)
        lower: Box<TypeShape>,
        /// Least specific bound (e.g. `List<T>?`)
        upper: Box<TypeShape>,
    },
    /// Type that failed to resolve
    Error,
}

/// Nominal type application
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassLikeType {
    /// Class the type refers to
    pub class_id: ClassId,
    /// Type arguments; for inner classes the inner class's own arguments come
    /// first, followed by the arguments of each enclosing class
    pub arguments: Vec<TypeProjection>,
    /// Whether the type is marked nullable (`T?`)
    pub nullable: bool,
    /// Whether this function type takes its first argument as a receiver
    pub extension_function: bool,
}

/// Reference to a type parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParameterType {
    /// Name of the referenced type parameter
    pub name: Symbol,
    /// Whether the reference is marked nullable (`T?`)
    pub nullable: bool,
}

/// Type argument with its use-site variance
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeProjection {
    /// `*`
    Star,
    /// `in T`
    In(TypeShape),
    /// `out T`
    Out(TypeShape),
    /// `T`
    Invariant(TypeShape),
}

/// Tag of a [`TypeProjection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    /// Star projection
    Star,
    /// Contravariant projection
    In,
    /// Covariant projection
    Out,
    /// No projection
    Invariant,
}

/// Declaration-site variance of a type parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variance {
    /// No variance modifier
    #[default]
    Invariant,
    /// `in`
    In,
    /// `out`
    Out,
}

/// Family of a built-in function type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionTypeKind {
    /// `kotlin.FunctionN`
    Function,
    /// `kotlin.coroutines.SuspendFunctionN`
    SuspendFunction,
}

impl Variance {
    /// Source label: empty for invariant
    pub fn label(self) -> &'static str {
        match self {
            Self::Invariant => "",
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl TypeProjection {
    /// Projection tag
    pub fn kind(&self) -> ProjectionKind {
        match self {
            Self::Star => ProjectionKind::Star,
            Self::In(_) => ProjectionKind::In,
            Self::Out(_) => ProjectionKind::Out,
            Self::Invariant(_) => ProjectionKind::Invariant,
        }
    }

    /// Projected type, absent for star projections
    pub fn ty(&self) -> Option<&TypeShape> {
        match self {
            Self::Star => None,
            Self::In(ty) | Self::Out(ty) | Self::Invariant(ty) => Some(ty),
        }
    }

    /// Rebuilds the projection around a new type, keeping its kind
    #[must_use]
    pub fn map(&self, f: impl FnOnce(&TypeShape) -> TypeShape) -> Self {
        match self {
            Self::Star => Self::Star,
            Self::In(ty) => Self::In(f(ty)),
            Self::Out(ty) => Self::Out(f(ty)),
            Self::Invariant(ty) => Self::Invariant(f(ty)),
        }
    }
}

impl From<TypeShape> for TypeProjection {
    fn from(ty: TypeShape) -> Self {
        Self::Invariant(ty)
    }
}

impl ClassLikeType {
    /// Non-nullable application of `class_id` to `arguments`
    pub fn new(class_id: ClassId, arguments: Vec<TypeProjection>) -> Self {
        Self {
            class_id,
            arguments,
            nullable: false,
            extension_function: false,
        }
    }

    /// Whether any argument is a star projection
    pub fn has_star_argument(&self) -> bool {
        self.arguments
            .iter()
            .any(|argument| argument.kind() == ProjectionKind::Star)
    }
}

impl TypeShape {
    /// Class type without arguments
    pub fn class(class_id: ClassId) -> Self {
        Self::ClassLike(ClassLikeType::new(class_id, Vec::new()))
    }

    /// Class type applied to arguments
    pub fn generic(class_id: ClassId, arguments: Vec<TypeProjection>) -> Self {
        Self::ClassLike(ClassLikeType::new(class_id, arguments))
    }

    /// Type parameter reference
    pub fn parameter(name: Symbol) -> Self {
        Self::TypeParameter(TypeParameterType {
            name,
            nullable: false,
        })
    }

    /// Flexible type between `lower` and `upper`
    pub fn flexible(lower: Self, upper: Self) -> Self {
        Self::Flexible {
            lower: Box::new(lower),
            upper: Box::new(upper),
        }
    }

    /// Whether the shape carries the nullable marker itself
    ///
    /// Intersections, flexible types and error types never do; a flexible
    /// type expresses nullability through its bounds.
    pub fn is_marked_nullable(&self) -> bool {
        match self {
            Self::ClassLike(class) => class.nullable,
            Self::TypeParameter(param) => param.nullable,
            Self::Intersection(_) | Self::Flexible { .. } | Self::Error => false,
        }
    }

    /// Copy of the shape with the nullable marker set or cleared
    ///
    /// Shapes that cannot carry the marker are returned unchanged.
    #[must_use]
    pub fn with_nullability(&self, nullable: bool) -> Self {
        match self {
            Self::ClassLike(class) => Self::ClassLike(ClassLikeType {
                nullable,
                ..class.clone()
            }),
            Self::TypeParameter(param) => Self::TypeParameter(TypeParameterType {
                nullable,
                ..param.clone()
            }),
            other => other.clone(),
        }
    }

    /// Marks the shape nullable
    #[must_use]
    pub fn nullable(&self) -> Self {
        self.with_nullability(true)
    }

    /// Class-like view of the shape
    pub fn as_class_like(&self) -> Option<&ClassLikeType> {
        match self {
            Self::ClassLike(class) => Some(class),
            _ => None,
        }
    }

    /// Class id of a class-like shape
    pub fn class_id(&self) -> Option<&ClassId> {
        self.as_class_like().map(|class| &class.class_id)
    }

    /// Whether this is the error type
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}
