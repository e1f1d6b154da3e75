//! Public approximation of non-denotable types
//!
//! Return types inferred from local classes, anonymous objects or
//! intersections cannot be written in source outside their scope. Before
//! rendering they are replaced by the nearest type that can.

use ql_decl::{Declaration, ResolutionSession};
use ql_ty::{ClassId, TypeShape};
use rustc_hash::FxHashSet;
use tracing::trace;

/// Replaces non-denotable parts of `shape` by public supertypes
///
/// - an intersection becomes its first component
/// - a local class or anonymous object becomes its first supertype, or
///   `kotlin.Any` without one; nullability is kept
/// - type arguments and flexible bounds are approximated recursively
pub fn approximate_to_public(session: &dyn ResolutionSession, shape: &TypeShape) -> TypeShape {
    Approximator {
        session,
        replaced: FxHashSet::default(),
    }
    .approximate(shape)
}

struct Approximator<'a> {
    session: &'a dyn ResolutionSession,
    /// Local classes already replaced on the current path
    replaced: FxHashSet<ClassId>,
}

impl Approximator<'_> {
    fn approximate(&mut self, shape: &TypeShape) -> TypeShape {
        match shape {
            TypeShape::Intersection(components) => components
                .first()
                .map_or(TypeShape::Error, |first| self.approximate(first)),
            TypeShape::Flexible { lower, upper } => {
                TypeShape::flexible(self.approximate(lower), self.approximate(upper))
            }
            TypeShape::ClassLike(class) => {
                if let Some(replacement) = self.local_replacement(&class.class_id) {
                    return replacement.with_nullability(class.nullable);
                }
                let mut approximated = class.clone();
                approximated.arguments = class
                    .arguments
                    .iter()
                    .map(|argument| argument.map(|ty| self.approximate(ty)))
                    .collect();
                TypeShape::ClassLike(approximated)
            }
            TypeShape::TypeParameter(_) | TypeShape::Error => shape.clone(),
        }
    }

    fn local_replacement(&mut self, class_id: &ClassId) -> Option<TypeShape> {
        let session = self.session;
        let id = session.resolve_class(class_id)?;
        let supertypes = match session.declaration(id) {
            Declaration::AnonymousObject(object) => &object.supertypes,
            Declaration::RegularClass(class) if class.class_id.local => &class.supertypes,
            _ => return None,
        };

        let any = || TypeShape::class(session.standard().any.clone());
        if !self.replaced.insert(class_id.clone()) {
            trace!("local supertype cycle, falling back to Any");
            return Some(any());
        }
        let replacement = supertypes
            .first()
            .map_or_else(any, |supertype| self.approximate(&supertype.ty));
        self.replaced.remove(class_id);
        Some(replacement)
    }
}
