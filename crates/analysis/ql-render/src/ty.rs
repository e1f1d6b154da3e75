//! Type rendering

use ql_decl::{Annotation, RegularClass, ResolutionSession, TypeRef};
use ql_ty::{ClassId, ClassLikeType, FunctionTypeKind, TypeProjection, TypeShape};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::flexible::fold_flexible;

/// Marker for types that cannot be resolved or rendered
pub const UNRESOLVED: &str = "???";

/// Renders [`TypeShape`]s as source-like text
///
/// Class names are fully qualified (`kotlin.collections.List<kotlin.Int>`)
/// unless short names are requested. Function types use the arrow sugar
/// and flexible types are folded into their compact `!` forms.
#[derive(Clone, Copy)]
pub struct TypeRenderer<'a> {
    session: &'a dyn ResolutionSession,
    short_qualified_names: bool,
}

impl<'a> TypeRenderer<'a> {
    /// Create a renderer resolving classes through `session`
    pub fn new(session: &'a dyn ResolutionSession, short_qualified_names: bool) -> Self {
        Self {
            session,
            short_qualified_names,
        }
    }

    /// Render a type preceded by its type annotations
    pub fn render(&self, ty: &TypeShape, annotations: &[Annotation]) -> String {
        let mut out = String::new();
        self.render_into(&mut out, ty, annotations);
        out
    }

    /// Render a type reference with its annotations
    pub fn render_type_ref(&self, type_ref: &TypeRef) -> String {
        self.render(&type_ref.ty, &type_ref.annotations)
    }

    /// Render an annotation list, each entry followed by a space
    pub fn render_annotations<'b>(
        &self,
        out: &mut String,
        annotations: impl IntoIterator<Item = &'b Annotation>,
    ) {
        for annotation in annotations {
            out.push('@');
            if let Some(use_site) = annotation.use_site {
                out.push_str(use_site.label());
                out.push(':');
            }
            out.push_str(&self.qualified_name(&annotation.class_id));
            if !annotation.arguments.is_empty() {
                out.push('(');
                out.push_str(&annotation.arguments.join(", "));
                out.push(')');
            }
            out.push(' ');
        }
    }

    /// Whether `ty` renders with the `(P) -> R` sugar
    ///
    /// Function types with a star-projected argument fall back to the
    /// nominal `kotlin.FunctionN<...>` form.
    pub fn should_render_as_function_type(&self, ty: &TypeShape) -> bool {
        self.function_type_kind(ty).is_some()
    }

    fn function_type_kind(&self, ty: &TypeShape) -> Option<FunctionTypeKind> {
        let class = ty.as_class_like()?;
        if class.has_star_argument() {
            return None;
        }
        self.session.function_type_kind(class)
    }

    fn render_into(&self, out: &mut String, ty: &TypeShape, annotations: &[Annotation]) {
        let start = out.len();
        self.render_annotations(out, annotations);
        let has_annotations = out.len() != start;

        match ty {
            TypeShape::Error => out.push_str(UNRESOLVED),
            TypeShape::TypeParameter(param) => out.push_str(self.session.interner().resolve(param.name)),
            TypeShape::Intersection(components) => {
                out.push('(');
                for (index, component) in components.iter().enumerate() {
                    if index != 0 {
                        out.push('&');
                    }
                    self.render_into(out, component, &[]);
                }
                out.push(')');
            }
            TypeShape::Flexible { lower, upper } => {
                let lower = self.render(lower, &[]);
                let upper = self.render(upper, &[]);
                out.push_str(&fold_flexible(&lower, &upper));
            }
            TypeShape::ClassLike(class) => match self.function_type_kind(ty) {
                Some(kind) => self.render_function_type(out, class, kind, start, has_annotations),
                None => self.render_class_like(out, class),
            },
        }

        if ty.is_marked_nullable() {
            out.push('?');
        }
    }

    fn render_function_type(
        &self,
        out: &mut String,
        class: &ClassLikeType,
        kind: FunctionTypeKind,
        start: usize,
        has_annotations: bool,
    ) {
        let is_suspend = kind == FunctionTypeKind::SuspendFunction;
        let receiver = class
            .extension_function
            .then(|| class.arguments.first().and_then(TypeProjection::ty))
            .flatten();

        let need_parentheses = class.nullable || (has_annotations && receiver.is_some());
        if need_parentheses {
            if is_suspend {
                out.insert(start, '(');
            } else {
                if has_annotations {
                    // `@A () -> R` would attach the annotation to the parameter list
                    let before_space = out.len() - 1;
                    if out.ends_with(' ') && !out[..before_space].ends_with(')') {
                        out.insert_str(before_space, "()");
                    }
                }
                out.push('(');
            }
        }

        if is_suspend {
            out.push_str("suspend ");
        }

        if let Some(receiver) = receiver {
            let surround = (self.should_render_as_function_type(receiver) && !receiver.is_marked_nullable())
                || self.function_type_kind(receiver) == Some(FunctionTypeKind::SuspendFunction);
            if surround {
                out.push('(');
            }
            self.render_into(out, receiver, &[]);
            if surround {
                out.push(')');
            }
            out.push('.');
        }

        let (return_type, parameters) = match class.arguments.split_last() {
            Some((last, rest)) => (last.ty(), rest),
            None => (None, &[][..]),
        };
        let parameters = if receiver.is_some() { parameters.get(1..).unwrap_or_default() } else { parameters };

        out.push('(');
        for (index, parameter) in parameters.iter().enumerate() {
            if index != 0 {
                out.push_str(", ");
            }
            self.render_projection(out, parameter);
        }
        out.push_str(") -> ");
        match return_type {
            Some(return_type) => self.render_into(out, return_type, &[]),
            None => out.push_str(UNRESOLVED),
        }

        if need_parentheses {
            out.push(')');
        }
    }

    fn render_class_like(&self, out: &mut String, class: &ClassLikeType) {
        let Some((_, declared)) = self.session.expand_to_regular_class(&class.class_id) else {
            debug!("unresolved class in rendered type");
            out.push_str(UNRESOLVED);
            return;
        };

        let chain = self.outer_chain(declared);
        let interner = self.session.interner();
        if !self.short_qualified_names && !declared.class_id.local && !declared.class_id.package.is_empty() {
            out.push_str(&declared.class_id.package_fq_name(interner));
            out.push('.');
        }

        // Arguments are stored innermost first; each class in an `inner` chain
        // consumes as many as it declares type parameters.
        let mut slices = Vec::with_capacity(chain.len());
        let mut offset = 0;
        let mut shares_arguments = true;
        for (index, level) in chain.iter().enumerate() {
            if index > 0 {
                shares_arguments = shares_arguments && chain[index - 1].is_inner();
            }
            if shares_arguments {
                let end = (offset + level.type_parameters.len()).min(class.arguments.len());
                slices.push(&class.arguments[offset..end]);
                offset = end;
            } else {
                slices.push(&[][..]);
            }
        }

        for (index, (level, arguments)) in chain.iter().zip(slices).rev().enumerate() {
            if index != 0 {
                out.push('.');
            }
            out.push_str(interner.resolve(level.name));
            if !arguments.is_empty() {
                out.push('<');
                for (position, argument) in arguments.iter().enumerate() {
                    if position != 0 {
                        out.push_str(", ");
                    }
                    self.render_projection(out, argument);
                }
                out.push('>');
            }
        }
    }

    /// `class` followed by its enclosing classes, innermost first
    fn outer_chain<'s>(&'s self, class: &'s RegularClass) -> Vec<&'s RegularClass> {
        let mut chain = vec![class];
        let mut visited: FxHashSet<ClassId> = FxHashSet::default();
        visited.insert(class.class_id.clone());
        let mut current = class;
        while let Some(outer_id) = current.class_id.outer() {
            if !visited.insert(outer_id.clone()) {
                break;
            }
            let Some(outer) = self
                .session
                .resolve_class(&outer_id)
                .and_then(|id| self.session.declaration(id).as_regular_class())
            else {
                break;
            };
            chain.push(outer);
            current = outer;
        }
        chain
    }

    fn render_projection(&self, out: &mut String, projection: &TypeProjection) {
        match projection {
            TypeProjection::Star => out.push('*'),
            TypeProjection::In(ty) => {
                out.push_str("in ");
                self.render_into(out, ty, &[]);
            }
            TypeProjection::Out(ty) => {
                out.push_str("out ");
                self.render_into(out, ty, &[]);
            }
            TypeProjection::Invariant(ty) => self.render_into(out, ty, &[]),
        }
    }

    fn qualified_name(&self, class_id: &ClassId) -> String {
        let interner = self.session.interner();
        if self.short_qualified_names {
            class_id
                .relative
                .iter()
                .map(|segment| interner.resolve(*segment))
                .collect::<Vec<_>>()
                .join(".")
        } else {
            class_id.as_fq_name(interner)
        }
    }
}
