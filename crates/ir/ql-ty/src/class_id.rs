//! Fully qualified class identifiers

use ql_intern::{Interner, Symbol};

/// Identifies a class-like declaration: its package plus the chain of class
/// names leading to it (`Outer`, `Inner` for `Outer.Inner`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassId {
    /// Package segments, empty for the root package
    pub package: Vec<Symbol>,
    /// Class names from the outermost class down to this one, never empty
    pub relative: Vec<Symbol>,
    /// Whether the class is declared inside a callable body
    pub local: bool,
}

impl ClassId {
    /// Creates an id for a top-level class
    pub fn top_level(package: Vec<Symbol>, name: Symbol) -> Self {
        Self {
            package,
            relative: vec![name],
            local: false,
        }
    }

    /// Parses `pkg/path/Outer.Inner`, interning every segment
    ///
    /// The package is separated by `/` and the nested class chain by `.`,
    /// so `kotlin/collections/Map.Entry` names `Entry` nested in `Map`.
    pub fn parse(interner: &Interner, text: &str) -> Self {
        let (package, classes) = text.rsplit_once('/').unwrap_or(("", text));
        let package = package
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| interner.intern(segment))
            .collect();
        let relative = classes.split('.').map(|segment| interner.intern(segment)).collect();
        Self {
            package,
            relative,
            local: false,
        }
    }

    /// Id of a class nested directly inside this one
    #[must_use]
    pub fn nested(&self, name: Symbol) -> Self {
        let mut relative = self.relative.clone();
        relative.push(name);
        Self {
            package: self.package.clone(),
            relative,
            local: self.local,
        }
    }

    /// Marks the id as belonging to a local class
    #[must_use]
    pub fn into_local(mut self) -> Self {
        self.local = true;
        self
    }

    /// Id of the directly enclosing class, if this class is nested
    pub fn outer(&self) -> Option<Self> {
        if self.relative.len() < 2 {
            return None;
        }
        let mut relative = self.relative.clone();
        relative.pop();
        Some(Self {
            package: self.package.clone(),
            relative,
            local: self.local,
        })
    }

    /// Simple name of the class
    pub fn short_name(&self) -> Option<Symbol> {
        self.relative.last().copied()
    }

    /// Whether the class is nested in another class
    pub fn is_nested(&self) -> bool {
        self.relative.len() > 1
    }

    /// Package rendered with `.` separators (`kotlin.collections`)
    pub fn package_fq_name(&self, interner: &Interner) -> String {
        join(interner, &self.package)
    }

    /// Fully qualified name with `.` separators (`kotlin.collections.Map.Entry`)
    pub fn as_fq_name(&self, interner: &Interner) -> String {
        let classes = join(interner, &self.relative);
        if self.package.is_empty() {
            classes
        } else {
            format!("{}.{classes}", self.package_fq_name(interner))
        }
    }
}

fn join(interner: &Interner, segments: &[Symbol]) -> String {
    segments
        .iter()
        .map(|segment| interner.resolve(*segment))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_class() {
        let interner = Interner::new();
        let id = ClassId::parse(&interner, "kotlin/collections/Map.Entry");
        assert_eq!(id.package.len(), 2);
        assert_eq!(id.relative.len(), 2);
        assert_eq!(id.as_fq_name(&interner), "kotlin.collections.Map.Entry");
        assert_eq!(id.package_fq_name(&interner), "kotlin.collections");
    }

    #[test]
    fn test_outer_chain() {
        let interner = Interner::new();
        let id = ClassId::parse(&interner, "a/Outer.Middle.Inner");
        let middle = id.outer();
        assert_eq!(
            middle.as_ref().map(|outer| outer.as_fq_name(&interner)),
            Some("a.Outer.Middle".to_string())
        );
        let outer = middle.and_then(|middle| middle.outer());
        assert_eq!(
            outer.as_ref().map(|outer| outer.as_fq_name(&interner)),
            Some("a.Outer".to_string())
        );
        assert_eq!(outer.and_then(|outer| outer.outer()), None);
    }

    #[test]
    fn test_root_package() {
        let interner = Interner::new();
        let id = ClassId::parse(&interner, "Foo");
        assert!(id.package.is_empty());
        assert_eq!(id.as_fq_name(&interner), "Foo");
        let nested = id.nested(interner.intern("Bar"));
        assert!(nested.is_nested());
        assert_eq!(nested.as_fq_name(&interner), "Foo.Bar");
    }
}
