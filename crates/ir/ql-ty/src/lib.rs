//! Type model
//!
//! A closed set of type shapes produced by the resolution stage and consumed
//! read-only by the renderer and the checkers:
//! - nominal class-like types with projected arguments
//! - type parameter references
//! - intersections
//! - flexible (platform) types with distinct lower and upper bounds
//! - the error type
//!
//! Shapes are plain values; all behavior beyond shape queries lives in the
//! consumers.
#![allow(
    clippy::min_ident_chars,
    reason = "Ty is the conventional name in type system implementations"
)]

pub mod class_id;
pub mod shape;
pub mod standard;

pub use class_id::ClassId;
pub use shape::{
    ClassLikeType, FunctionTypeKind, ProjectionKind, TypeParameterType, TypeProjection, TypeShape,
    Variance,
};
pub use standard::StandardClassIds;
