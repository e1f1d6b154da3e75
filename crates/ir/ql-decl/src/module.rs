//! Resolved module and the lookup interface the renderer and checkers use

use crate::{DeclId, Declaration, RegularClass};
use la_arena::Arena;
use ql_intern::Interner;
use ql_ty::{ClassId, ClassLikeType, FunctionTypeKind, StandardClassIds, TypeShape};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Lookup services provided by the resolution stage
pub trait ResolutionSession {
    /// Declaration stored under `id`
    fn declaration(&self, id: DeclId) -> &Declaration;

    /// Class-like declaration (class or type alias) with the given id
    fn resolve_class(&self, class_id: &ClassId) -> Option<DeclId>;

    /// Built-in function type family of the class, following aliases
    fn function_type_kind(&self, ty: &ClassLikeType) -> Option<FunctionTypeKind>;

    /// Interner holding every name in the module
    fn interner(&self) -> &Interner;

    /// Ids of the standard classes
    fn standard(&self) -> &StandardClassIds;

    /// Follows type aliases from `class_id` to the regular class they expand to
    ///
    /// Alias chains that loop back on themselves resolve to nothing.
    fn expand_to_regular_class(&self, class_id: &ClassId) -> Option<(DeclId, &RegularClass)> {
        let mut visited = FxHashSet::default();
        let mut current = class_id.clone();
        loop {
            if !visited.insert(current.clone()) {
                debug!(class = %current.as_fq_name(self.interner()), "type alias cycle");
                return None;
            }
            let id = self.resolve_class(&current)?;
            match self.declaration(id) {
                Declaration::RegularClass(class) => return Some((id, class)),
                Declaration::TypeAlias(alias) => current = alias.expanded.ty.class_id()?.clone(),
                _ => return None,
            }
        }
    }

    /// Regular class a class-like type refers to
    fn regular_class(&self, ty: &TypeShape) -> Option<(DeclId, &RegularClass)> {
        self.expand_to_regular_class(ty.class_id()?)
    }
}

/// Declarations of one module together with the classes they can see
#[derive(Debug)]
pub struct ResolvedModule {
    pub(crate) declarations: Arena<Declaration>,
    pub(crate) classes: FxHashMap<ClassId, DeclId>,
    pub(crate) function_types: FxHashMap<ClassId, FunctionTypeKind>,
    pub(crate) roots: Vec<DeclId>,
    pub(crate) interner: Interner,
    pub(crate) standard: StandardClassIds,
}

impl ResolvedModule {
    /// Top-level declarations of the module in source order
    ///
    /// Classes declared as external dependencies are resolvable but not listed.
    pub fn roots(&self) -> &[DeclId] {
        &self.roots
    }

    /// Every declaration with its id, in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.declarations.iter()
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the module holds no declarations
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl ResolutionSession for ResolvedModule {
    fn declaration(&self, id: DeclId) -> &Declaration {
        &self.declarations[id]
    }

    fn resolve_class(&self, class_id: &ClassId) -> Option<DeclId> {
        self.classes.get(class_id).copied()
    }

    fn function_type_kind(&self, ty: &ClassLikeType) -> Option<FunctionTypeKind> {
        if let Some(kind) = self.function_types.get(&ty.class_id) {
            return Some(*kind);
        }
        let (_, class) = self.expand_to_regular_class(&ty.class_id)?;
        self.function_types.get(&class.class_id).copied()
    }

    fn interner(&self) -> &Interner {
        &self.interner
    }

    fn standard(&self) -> &StandardClassIds {
        &self.standard
    }
}

/// Containing-declaration context threaded through recursive walks
///
/// The scope is a value: entering a declaration produces a new scope and
/// leaves the caller's untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeclarationScope {
    /// Directly containing declaration, absent at top level
    pub containing: Option<DeclId>,
    /// Brace nesting depth of the rendered output
    pub depth: usize,
}

impl DeclarationScope {
    /// Scope of a declaration rendered or checked on its own
    pub fn new(containing: Option<DeclId>) -> Self {
        Self {
            containing,
            depth: 0,
        }
    }

    /// Scope of the children of `id`
    #[must_use]
    pub fn enter(self, id: DeclId) -> Self {
        Self {
            containing: Some(id),
            ..self
        }
    }

    /// Scope one brace level deeper
    #[must_use]
    pub fn indented(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    /// Whether there is no containing declaration
    pub fn is_top_level(self) -> bool {
        self.containing.is_none()
    }
}
