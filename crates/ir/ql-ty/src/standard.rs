//! Class ids of the standard library types the renderer and checkers ask about

use crate::class_id::ClassId;
use crate::shape::TypeShape;
use ql_intern::Interner;

/// Interned ids of well-known standard classes
#[derive(Debug, Clone)]
pub struct StandardClassIds {
    /// `kotlin.Any`
    pub any: ClassId,
    /// `kotlin.Unit`
    pub unit: ClassId,
    /// `kotlin.Nothing`
    pub nothing: ClassId,
    /// `kotlin.Array`
    pub array: ClassId,
    /// `kotlin.String`
    pub string: ClassId,
}

impl StandardClassIds {
    /// Interns the standard ids in `interner`
    pub fn new(interner: &Interner) -> Self {
        Self {
            any: ClassId::parse(interner, "kotlin/Any"),
            unit: ClassId::parse(interner, "kotlin/Unit"),
            nothing: ClassId::parse(interner, "kotlin/Nothing"),
            array: ClassId::parse(interner, "kotlin/Array"),
            string: ClassId::parse(interner, "kotlin/String"),
        }
    }

    /// `kotlin.Any`, nullable or not
    pub fn is_any_or_nullable_any(&self, shape: &TypeShape) -> bool {
        shape.class_id() == Some(&self.any)
    }

    /// Non-nullable `kotlin.Any`
    pub fn is_any(&self, shape: &TypeShape) -> bool {
        self.is_any_or_nullable_any(shape) && !shape.is_marked_nullable()
    }

    /// `kotlin.Any?`, the implicit upper bound of every type parameter
    pub fn is_nullable_any(&self, shape: &TypeShape) -> bool {
        self.is_any_or_nullable_any(shape) && shape.is_marked_nullable()
    }

    /// Non-nullable `kotlin.Unit`
    pub fn is_unit(&self, shape: &TypeShape) -> bool {
        shape.class_id() == Some(&self.unit) && !shape.is_marked_nullable()
    }

    /// `kotlin.Nothing`, nullable or not
    pub fn is_nothing(&self, shape: &TypeShape) -> bool {
        shape.class_id() == Some(&self.nothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_queries_respect_nullability() {
        let interner = Interner::new();
        let ids = StandardClassIds::new(&interner);
        let any = TypeShape::class(ids.any.clone());
        assert!(ids.is_any(&any));
        assert!(!ids.is_nullable_any(&any));
        assert!(ids.is_nullable_any(&any.nullable()));
        assert!(ids.is_any_or_nullable_any(&any.nullable()));
    }

    #[test]
    fn test_unit_and_nothing() {
        let interner = Interner::new();
        let ids = StandardClassIds::new(&interner);
        let unit = TypeShape::class(ids.unit.clone());
        assert!(ids.is_unit(&unit));
        assert!(!ids.is_unit(&unit.nullable()));
        assert!(ids.is_nothing(&TypeShape::class(ids.nothing.clone()).nullable()));
        assert!(!ids.is_nothing(&TypeShape::Error));
    }
}
