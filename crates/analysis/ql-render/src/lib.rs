//! Source-like rendering of types and declarations
//!
//! [`TypeRenderer`] turns type shapes into text such as
//! `kotlin.collections.(Mutable)List<kotlin.String!>!` or
//! `suspend kotlin.Int.() -> kotlin.Unit`. [`DeclarationRenderer`] renders
//! declaration signatures (optionally with their members in brace blocks),
//! as shown in hovers and golden test output.

pub mod approximate;
pub mod declaration;
pub mod flexible;
pub mod names;
pub mod options;
pub mod ty;
mod writer;

use thiserror::Error;

pub use approximate::approximate_to_public;
pub use declaration::DeclarationRenderer;
pub use flexible::fold_flexible;
pub use names::render_name;
pub use options::{RendererModifier, RendererOptions};
pub use ty::{TypeRenderer, UNRESOLVED};

/// Invalid rendering requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A constructor needs a class, anonymous object or enum entry around it
    #[error("constructor rendered inside {containing}, expected a class, anonymous object or enum entry")]
    ConstructorOutsideClass {
        /// Kind of the containing declaration that was given
        containing: &'static str,
    },
    /// An accessor needs its property around it
    #[error("property accessor rendered inside {containing}, expected a property")]
    AccessorOutsideProperty {
        /// Kind of the containing declaration that was given
        containing: &'static str,
    },
}
