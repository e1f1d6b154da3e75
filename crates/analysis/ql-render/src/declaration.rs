//! Declaration rendering

use ql_decl::{
    Annotation, AnnotationUseSite, AnonymousObject, ClassKind, Constructor, DeclId, Declaration,
    DeclarationScope, DeclarationStatus, DeclarationVisitor, Modality, Modifier, Property,
    PropertyAccessor, RegularClass, ResolutionSession, SimpleFunction, TypeAlias, TypeParameter,
    TypeRef, ValueParameter, Visibility,
};
use ql_intern::Symbol;
use ql_ty::ClassId;
use tracing::trace;

use crate::approximate::approximate_to_public;
use crate::names::render_name;
use crate::options::{RendererModifier, RendererOptions};
use crate::ty::TypeRenderer;
use crate::writer::RenderBuffer;
use crate::RenderError;

const NO_NAME_PROVIDED: &str = "<no name provided>";
const DEFAULT_COMPANION_NAME: &str = "Companion";

/// Renders declarations as source-like signatures
///
/// A renderer is created per invocation; [`DeclarationRenderer::render`]
/// is the usual entry point.
pub struct DeclarationRenderer<'a> {
    session: &'a dyn ResolutionSession,
    options: &'a RendererOptions,
    types: TypeRenderer<'a>,
    out: RenderBuffer,
}

impl<'a> DeclarationRenderer<'a> {
    /// Create a renderer with an empty output buffer
    pub fn new(session: &'a dyn ResolutionSession, options: &'a RendererOptions) -> Self {
        Self {
            session,
            options,
            types: TypeRenderer::new(session, options.short_qualified_names),
            out: RenderBuffer::default(),
        }
    }

    /// Render `id` as seen from `containing`
    ///
    /// # Errors
    /// Fails when a constructor or accessor is rendered without the kind of
    /// containing declaration it needs.
    pub fn render(
        session: &'a dyn ResolutionSession,
        id: DeclId,
        containing: Option<DeclId>,
        options: &'a RendererOptions,
    ) -> Result<String, RenderError> {
        let mut renderer = Self::new(session, options);
        renderer.visit_declaration(id, DeclarationScope::new(containing))?;
        Ok(renderer.finish())
    }

    /// Rendered text, trimmed
    pub fn finish(self) -> String {
        self.out.finish()
    }

    fn enabled(&self, modifier: RendererModifier) -> bool {
        self.options.has(modifier)
    }

    fn push_name(&mut self, name: Symbol) {
        let session = self.session;
        self.out.push_str(&render_name(session.interner().resolve(name)));
    }

    fn render_type(&self, type_ref: &TypeRef, approximate: bool) -> String {
        if approximate {
            let approximated = approximate_to_public(self.session, &type_ref.ty);
            self.types.render(&approximated, &type_ref.annotations)
        } else {
            self.types.render_type_ref(type_ref)
        }
    }

    // Modifiers

    fn render_annotations(&mut self, annotations: &[Annotation]) {
        self.render_annotations_where(annotations, |use_site| use_site != Some(AnnotationUseSite::Receiver));
    }

    fn render_annotations_where(
        &mut self,
        annotations: &[Annotation],
        filter: impl Fn(Option<AnnotationUseSite>) -> bool,
    ) {
        if !self.enabled(RendererModifier::Annotations) {
            return;
        }
        let mut text = String::new();
        self.types
            .render_annotations(&mut text, annotations.iter().filter(|annotation| filter(annotation.use_site)));
        self.out.push_str(&text);
    }

    fn render_visibility(&mut self, visibility: Visibility) {
        if !self.enabled(RendererModifier::Visibility) {
            return;
        }
        let visibility = if self.options.normalized_visibilities {
            visibility.normalize()
        } else {
            visibility
        };
        if visibility != Visibility::Public {
            self.out.modifier(true, visibility.display_name());
        }
    }

    fn render_modality(&mut self, modality: Modality, implicit: Modality) {
        self.out.modifier(
            self.enabled(RendererModifier::Modality) && modality != implicit,
            modality.keyword(),
        );
    }

    fn render_callable_modality(&mut self, status: &DeclarationStatus, scope: DeclarationScope) {
        let Some(modality) = status.modality else {
            return;
        };
        if (scope.is_top_level() && modality == Modality::Final) || status.has_override_keyword {
            return;
        }
        let implicit = self.implicit_callable_modality(status, scope);
        self.render_modality(modality, implicit);
    }

    fn implicit_callable_modality(&self, status: &DeclarationStatus, scope: DeclarationScope) -> Modality {
        let Some(class) = scope
            .containing
            .and_then(|id| self.session.declaration(id).as_regular_class())
        else {
            return Modality::Final;
        };
        if status.has_override_keyword && class.status.modality != Some(Modality::Final) {
            return Modality::Open;
        }
        if class.is_interface() && status.visibility != Visibility::Private {
            if status.is_abstract() {
                Modality::Abstract
            } else {
                Modality::Open
            }
        } else {
            Modality::Final
        }
    }

    fn render_member_modifiers(&mut self, status: &DeclarationStatus) {
        self.out.modifier(status.has(Modifier::External), "external");
        self.out.modifier(
            self.enabled(RendererModifier::Expect) && status.has(Modifier::Expect),
            "expect",
        );
        self.out.modifier(
            self.enabled(RendererModifier::Actual) && status.has(Modifier::Actual),
            "actual",
        );
    }

    fn render_override(&mut self, status: &DeclarationStatus) {
        self.out.modifier(
            self.enabled(RendererModifier::Override) && status.has_override_keyword,
            "override",
        );
    }

    fn render_additional_modifiers(&mut self, status: &DeclarationStatus) {
        for (modifier, keyword) in [
            (Modifier::Tailrec, "tailrec"),
            (Modifier::Suspend, "suspend"),
            (Modifier::Inline, "inline"),
            (Modifier::Infix, "infix"),
            (Modifier::Operator, "operator"),
        ] {
            self.out.modifier(status.has(modifier), keyword);
        }
    }

    // Type parameters

    fn type_parameters(&self, ids: &[DeclId]) -> Vec<&'a TypeParameter> {
        let session = self.session;
        ids.iter()
            .filter_map(|id| session.declaration(*id).as_type_parameter())
            .collect()
    }

    fn render_type_parameters(&mut self, ids: &[DeclId], with_space: bool) {
        let params = self.type_parameters(ids);
        if params.is_empty() {
            return;
        }
        self.out.push('<');
        for (index, param) in params.into_iter().enumerate() {
            if index != 0 {
                self.out.push_str(", ");
            }
            self.render_type_parameter(param, false);
        }
        self.out.push('>');
        if with_space {
            self.out.push(' ');
        }
    }

    fn render_type_parameter(&mut self, param: &TypeParameter, top_level: bool) {
        if top_level {
            self.out.push('<');
        }
        self.out.modifier(param.is_reified, "reified");
        let variance = param.variance.label();
        self.out.modifier(!variance.is_empty(), variance);
        self.render_annotations(&param.annotations);
        self.push_name(param.name);

        let session = self.session;
        let standard = session.standard();
        match param.bounds.as_slice() {
            [] => {}
            [first, ..] if param.bounds.len() == 1 || !top_level => {
                if !standard.is_nullable_any(&first.ty) {
                    self.out.push_str(" : ");
                    let bound = self.render_type(first, false);
                    self.out.push_str(&bound);
                }
            }
            bounds => {
                let mut first = true;
                for bound in bounds.iter().filter(|bound| !standard.is_nullable_any(&bound.ty)) {
                    self.out.push_str(if first { " : " } else { " & " });
                    let bound = self.render_type(bound, false);
                    self.out.push_str(&bound);
                    first = false;
                }
            }
        }

        if top_level {
            self.out.push('>');
        }
    }

    /// ` where T : B2, ...` for the bounds after the first
    fn render_where_suffix(&mut self, ids: &[DeclId]) {
        let mut constraints = Vec::new();
        for param in self.type_parameters(ids) {
            let name = render_name(self.session.interner().resolve(param.name));
            for bound in param.bounds.iter().skip(1) {
                constraints.push(format!("{name} : {}", self.render_type(bound, false)));
            }
        }
        if !constraints.is_empty() {
            self.out.push_str(" where ");
            self.out.push_str(&constraints.join(", "));
        }
    }

    // Signature parts

    fn render_receiver(&mut self, receiver: Option<&TypeRef>, annotations: &[Annotation]) {
        let Some(receiver) = receiver else {
            return;
        };
        self.render_annotations_where(annotations, |use_site| use_site == Some(AnnotationUseSite::Receiver));
        let rendered = self.render_type(receiver, false);
        self.out.push_str(&rendered);
        self.out.push('.');
    }

    fn render_value_parameters(&mut self, ids: &[DeclId], in_primary_constructor: bool) {
        let session = self.session;
        self.out.push('(');
        let params = ids
            .iter()
            .filter_map(|id| session.declaration(*id).as_value_parameter());
        for (index, param) in params.enumerate() {
            if index != 0 {
                self.out.push_str(", ");
            }
            self.render_value_parameter(param, in_primary_constructor, false);
        }
        self.out.push(')');
    }

    fn render_value_parameter(&mut self, param: &ValueParameter, in_primary_constructor: bool, top_level: bool) {
        self.out.modifier(top_level, "value-parameter");
        self.render_annotations(&param.annotations);
        self.out.modifier(param.modifiers.contains(Modifier::Crossinline), "crossinline");
        self.out.modifier(param.modifiers.contains(Modifier::Noinline), "noinline");
        self.out.modifier(param.modifiers.contains(Modifier::Vararg), "vararg");
        if in_primary_constructor {
            self.out.push_str(if param.is_var { "var " } else { "val " });
        }
        self.push_name(param.name);
        self.out.push_str(": ");
        let ty = self.render_type(&param.return_type, false);
        self.out.push_str(&ty);
        if param.has_default_value {
            self.out.push_str(" = ...");
        }
    }

    fn render_supertypes(&mut self, class_id: &ClassId, supertypes: &[TypeRef]) {
        let session = self.session;
        let standard = session.standard();
        if *class_id == standard.nothing {
            return;
        }
        match supertypes {
            [] => return,
            [only] if standard.is_any_or_nullable_any(&only.ty) => return,
            _ => {}
        }
        let rendered: Vec<String> = supertypes
            .iter()
            .map(|supertype| self.render_type(supertype, false))
            .collect();
        self.out.space_if_needed();
        self.out.push_str(": ");
        self.out.push_str(&rendered.join(", "));
    }

    /// Renders ` { ... }` around the children of `id`
    ///
    /// Nothing is kept when the children produce no text.
    fn under_block(
        &mut self,
        id: DeclId,
        scope: DeclarationScope,
        children: impl FnOnce(&mut Self, DeclarationScope) -> Result<(), RenderError>,
    ) -> Result<(), RenderError> {
        if !self.options.render_containing_declarations {
            return Ok(());
        }
        let saved = self.out.len();
        self.out.push_str(" {");
        let opened = self.out.len();
        children(self, scope.enter(id).indented())?;
        if self.out.len() == opened {
            trace!("rolling back empty block");
            self.out.truncate(saved);
        } else {
            self.out.new_line(scope.depth);
            self.out.push('}');
        }
        Ok(())
    }
}

impl<'a> DeclarationVisitor<'a> for DeclarationRenderer<'a> {
    type Error = RenderError;

    fn session(&self) -> &'a dyn ResolutionSession {
        self.session
    }

    fn visit_regular_class(
        &mut self,
        id: DeclId,
        class: &'a RegularClass,
        scope: DeclarationScope,
    ) -> Result<(), RenderError> {
        self.out.new_line(scope.depth);
        self.render_annotations(&class.annotations);
        if class.kind != ClassKind::EnumEntry {
            self.render_visibility(class.status.visibility);
        }

        if let Some(modality) = class.status.modality {
            let implied = (class.is_interface() && modality == Modality::Abstract)
                || (class.kind.is_singleton() && modality == Modality::Final);
            if !implied {
                let implicit = if class.is_interface() {
                    Modality::Abstract
                } else {
                    Modality::Final
                };
                self.render_modality(modality, implicit);
            }
        }

        self.render_member_modifiers(&class.status);
        for (renderer_modifier, modifier, keyword) in [
            (RendererModifier::Inner, Modifier::Inner, "inner"),
            (RendererModifier::Data, Modifier::Data, "data"),
            (RendererModifier::Inline, Modifier::Inline, "inline"),
            (RendererModifier::Fun, Modifier::Fun, "fun"),
        ] {
            self.out
                .modifier(self.enabled(renderer_modifier) && class.status.has(modifier), keyword);
        }

        if class.is_companion {
            self.out.push_str("companion object");
            if self.session.interner().resolve(class.name) != DEFAULT_COMPANION_NAME {
                self.out.space_if_needed();
                self.push_name(class.name);
            }
        } else {
            self.out.push_str(class.kind.keyword());
            self.out.space_if_needed();
            self.push_name(class.name);
        }

        if class.kind == ClassKind::EnumEntry {
            return Ok(());
        }

        self.render_type_parameters(&class.type_parameters, false);
        self.render_supertypes(&class.class_id, &class.supertypes);
        self.render_where_suffix(&class.type_parameters);

        self.under_block(id, scope, |renderer, inner| {
            renderer.visit_all(&class.members, inner)
        })
    }

    fn visit_anonymous_object(
        &mut self,
        id: DeclId,
        object: &'a AnonymousObject,
        scope: DeclarationScope,
    ) -> Result<(), RenderError> {
        self.out.new_line(scope.depth);
        self.render_annotations(&object.annotations);
        self.out.push_str("object");
        self.render_supertypes(&object.class_id, &object.supertypes);

        self.under_block(id, scope, |renderer, inner| {
            renderer.visit_all(&object.members, inner)
        })
    }

    fn visit_simple_function(
        &mut self,
        id: DeclId,
        function: &'a SimpleFunction,
        scope: DeclarationScope,
    ) -> Result<(), RenderError> {
        self.out.new_line(scope.depth);
        self.render_annotations(&function.annotations);
        self.render_visibility(function.status.visibility);
        self.render_callable_modality(&function.status, scope);
        self.render_member_modifiers(&function.status);
        self.render_override(&function.status);
        self.render_additional_modifiers(&function.status);
        self.out.push_str("fun ");
        self.render_type_parameters(&function.type_parameters, true);
        self.render_receiver(function.receiver.as_ref(), &function.annotations);
        self.push_name(function.name);
        self.render_value_parameters(&function.value_parameters, false);

        let returns_unit = self.session.standard().is_unit(&function.return_type.ty);
        if self.options.unit_return_type_shown || !returns_unit {
            self.out.push_str(": ");
            let return_type = self.render_type(&function.return_type, self.options.approximate_types);
            self.out.push_str(&return_type);
        }
        self.render_where_suffix(&function.type_parameters);

        match &function.body {
            Some(body) => self.under_block(id, scope, |renderer, inner| renderer.visit_block(body, inner)),
            None => Ok(()),
        }
    }

    fn visit_property(
        &mut self,
        _id: DeclId,
        property: &'a Property,
        scope: DeclarationScope,
    ) -> Result<(), RenderError> {
        self.out.new_line(scope.depth);
        self.render_annotations(&property.annotations);
        self.render_visibility(property.status.visibility);
        self.out.modifier(
            self.enabled(RendererModifier::Const) && property.status.has(Modifier::Const),
            "const",
        );
        self.render_member_modifiers(&property.status);
        self.render_callable_modality(&property.status, scope);
        self.render_override(&property.status);
        self.out.modifier(
            self.enabled(RendererModifier::Lateinit) && property.status.has(Modifier::Lateinit),
            "lateinit",
        );
        self.out.push_str(if property.is_var { "var " } else { "val " });
        self.render_type_parameters(&property.type_parameters, true);
        self.render_receiver(property.receiver.as_ref(), &property.annotations);
        self.push_name(property.name);
        self.out.push_str(": ");
        let ty = self.render_type(&property.return_type, self.options.approximate_types);
        self.out.push_str(&ty);
        self.render_where_suffix(&property.type_parameters);
        Ok(())
    }

    fn visit_property_accessor(
        &mut self,
        id: DeclId,
        accessor: &'a PropertyAccessor,
        scope: DeclarationScope,
    ) -> Result<(), RenderError> {
        let containing = scope.containing.map(|owner| self.session.declaration(owner));
        if !matches!(containing, Some(Declaration::Property(_))) {
            return Err(RenderError::AccessorOutsideProperty {
                containing: containing.map_or("nothing", Declaration::kind_name),
            });
        }

        self.render_annotations(&accessor.annotations);
        self.render_visibility(accessor.status.visibility);
        self.render_callable_modality(&accessor.status, scope);
        self.render_member_modifiers(&accessor.status);
        self.render_additional_modifiers(&accessor.status);
        self.out.push_str(if accessor.is_getter { "get " } else { "set " });

        match &accessor.body {
            Some(body) => self.under_block(id, scope, |renderer, inner| renderer.visit_block(body, inner)),
            None => Ok(()),
        }
    }

    fn visit_constructor(
        &mut self,
        id: DeclId,
        constructor: &'a Constructor,
        scope: DeclarationScope,
    ) -> Result<(), RenderError> {
        let containing = scope.containing.map(|owner| self.session.declaration(owner));
        let class_name = match containing {
            Some(Declaration::RegularClass(class)) => Some(class.name),
            Some(Declaration::EnumEntry(entry)) => Some(entry.name),
            Some(Declaration::AnonymousObject(_)) => None,
            other => {
                return Err(RenderError::ConstructorOutsideClass {
                    containing: other.map_or("nothing", Declaration::kind_name),
                });
            }
        };

        self.out.new_line(scope.depth);
        self.render_annotations(&constructor.annotations);
        self.out.push_str("constructor ");
        match class_name {
            Some(name) => self.push_name(name),
            None => self.out.push_str(NO_NAME_PROVIDED),
        }
        self.render_type_parameters(&constructor.type_parameters, false);
        self.render_value_parameters(&constructor.value_parameters, constructor.is_primary);
        self.render_where_suffix(&constructor.type_parameters);

        match &constructor.body {
            Some(body) => self.under_block(id, scope, |renderer, inner| renderer.visit_block(body, inner)),
            None => Ok(()),
        }
    }

    fn visit_type_alias(
        &mut self,
        _id: DeclId,
        alias: &'a TypeAlias,
        _scope: DeclarationScope,
    ) -> Result<(), RenderError> {
        self.render_annotations(&alias.annotations);
        self.render_visibility(alias.status.visibility);
        self.render_member_modifiers(&alias.status);
        self.out.push_str("typealias ");
        self.push_name(alias.name);
        self.render_type_parameters(&alias.type_parameters, false);
        self.out.push_str(" = ");
        let expanded = self.render_type(&alias.expanded, false);
        self.out.push_str(&expanded);
        Ok(())
    }

    fn visit_type_parameter(
        &mut self,
        _id: DeclId,
        param: &'a TypeParameter,
        _scope: DeclarationScope,
    ) -> Result<(), RenderError> {
        self.render_type_parameter(param, true);
        Ok(())
    }

    fn visit_value_parameter(
        &mut self,
        _id: DeclId,
        param: &'a ValueParameter,
        scope: DeclarationScope,
    ) -> Result<(), RenderError> {
        let in_constructor = scope
            .containing
            .is_some_and(|owner| matches!(self.session.declaration(owner), Declaration::Constructor(_)));
        self.render_value_parameter(param, in_constructor, true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use ql_decl::{
        AccessorConfig, ClassConfig, Container, ConstructorConfig, FunctionConfig, ModuleBuilder,
        PropertyConfig, ResolvedModule, TypeParameterConfig, ValueParameterConfig, modifiers,
    };
    use ql_ty::Variance;

    fn render(module: &ResolvedModule, id: DeclId, containing: Option<DeclId>) -> String {
        DeclarationRenderer::render(module, id, containing, &RendererOptions::default()).unwrap()
    }

    fn render_with(module: &ResolvedModule, id: DeclId, containing: Option<DeclId>, options: &RendererOptions) -> String {
        DeclarationRenderer::render(module, id, containing, options).unwrap()
    }

    #[test]
    fn test_top_level_function() {
        let mut builder = ModuleBuilder::new();
        let function = builder.add_function(
            Container::Package("test"),
            "greet",
            FunctionConfig {
                return_type: Some(builder.ty("kotlin/String").into()),
                modifiers: modifiers(&[Modifier::Inline]),
                has_body: true,
                ..FunctionConfig::default()
            },
        );
        builder.add_value_parameter(function, "name", builder.ty("kotlin/String"), ValueParameterConfig::default());
        builder.add_value_parameter(
            function,
            "times",
            builder.ty("kotlin/Int"),
            ValueParameterConfig {
                has_default_value: true,
                ..ValueParameterConfig::default()
            },
        );
        let module = builder.finish();

        expect!["inline fun greet(name: kotlin.String, times: kotlin.Int = ...): kotlin.String"]
            .assert_eq(&render(&module, function, None));
    }

    #[test]
    fn test_unit_return_type_is_hidden_by_default() {
        let mut builder = ModuleBuilder::new();
        let function = builder.add_function(Container::Package("test"), "run", FunctionConfig::default());
        let module = builder.finish();
        let options = RendererOptions {
            unit_return_type_shown: true,
            ..RendererOptions::default()
        };

        expect!["fun run()"].assert_eq(&render(&module, function, None));
        expect!["fun run(): kotlin.Unit"].assert_eq(&render_with(&module, function, None, &options));
    }

    #[test]
    fn test_type_parameters_and_where_suffix() {
        let mut builder = ModuleBuilder::new();
        let function = builder.add_function(Container::Package("test"), "sort", FunctionConfig::default());
        let comparable = builder.generic(
            "kotlin/Comparable",
            vec![builder.type_parameter_ty("T").into()],
        );
        let param = builder.add_type_parameter(
            function,
            "T",
            TypeParameterConfig {
                bounds: vec![comparable.into(), builder.ty("kotlin/CharSequence").into()],
                ..TypeParameterConfig::default()
            },
        );
        builder.add_type_parameter(
            function,
            "R",
            TypeParameterConfig {
                reified: true,
                variance: Variance::Out,
                ..TypeParameterConfig::default()
            },
        );
        let module = builder.finish();

        expect!["fun <T : kotlin.Comparable<T>, reified out R> sort() where T : kotlin.CharSequence"]
            .assert_eq(&render(&module, function, None));
        expect!["<T : kotlin.Comparable<T> & kotlin.CharSequence>"]
            .assert_eq(&render(&module, param, Some(function)));
    }

    #[test]
    fn test_nullable_any_bound_is_omitted() {
        let mut builder = ModuleBuilder::new();
        let function = builder.add_function(Container::Package("test"), "id", FunctionConfig::default());
        let any = builder.ty("kotlin/Any").nullable();
        let param = builder.add_type_parameter(
            function,
            "T",
            TypeParameterConfig {
                bounds: vec![any.into()],
                ..TypeParameterConfig::default()
            },
        );
        let module = builder.finish();
        expect!["<T>"].assert_eq(&render(&module, param, Some(function)));
    }

    #[test]
    fn test_class_header() {
        let mut builder = ModuleBuilder::new();
        let base = builder.add_class(
            Container::Package("test"),
            "Base",
            ClassConfig {
                modality: Some(Modality::Abstract),
                ..ClassConfig::default()
            },
        );
        let base_ty = builder.class_type(base);
        let data = builder.add_class(
            Container::Package("test"),
            "Point",
            ClassConfig {
                visibility: Visibility::Internal,
                modifiers: modifiers(&[Modifier::Data]),
                supertypes: vec![base_ty.into()],
                ..ClassConfig::default()
            },
        );
        let any = builder.ty("kotlin/Any");
        let plain = builder.add_class(
            Container::Package("test"),
            "Plain",
            ClassConfig {
                supertypes: vec![any.into()],
                ..ClassConfig::default()
            },
        );
        let module = builder.finish();

        expect!["abstract class Base"].assert_eq(&render(&module, base, None));
        expect!["internal data class Point : test.Base"].assert_eq(&render(&module, data, None));
        expect!["class Plain"].assert_eq(&render(&module, plain, None));
    }

    #[test]
    fn test_fun_interface_and_companion() {
        let mut builder = ModuleBuilder::new();
        let action = builder.add_class(
            Container::Package("test"),
            "Action",
            ClassConfig {
                kind: ClassKind::Interface,
                modifiers: modifiers(&[Modifier::Fun]),
                ..ClassConfig::default()
            },
        );
        let host = builder.add_class(Container::Package("test"), "Host", ClassConfig::default());
        let companion = builder.add_class(
            Container::Class(host),
            "Companion",
            ClassConfig {
                kind: ClassKind::Object,
                companion: true,
                ..ClassConfig::default()
            },
        );
        let named = builder.add_class(
            Container::Class(host),
            "Factory",
            ClassConfig {
                kind: ClassKind::Object,
                companion: true,
                ..ClassConfig::default()
            },
        );
        let module = builder.finish();

        expect!["fun interface Action"].assert_eq(&render(&module, action, None));
        expect!["companion object"].assert_eq(&render(&module, companion, Some(host)));
        expect!["companion object Factory"].assert_eq(&render(&module, named, Some(host)));
    }

    #[test]
    fn test_interface_member_modality() {
        let mut builder = ModuleBuilder::new();
        let shape = builder.add_class(
            Container::Package("test"),
            "Shape",
            ClassConfig {
                kind: ClassKind::Interface,
                ..ClassConfig::default()
            },
        );
        let area = builder.add_function(Container::Class(shape), "area", FunctionConfig::default());
        let describe = builder.add_function(
            Container::Class(shape),
            "describe",
            FunctionConfig {
                has_body: true,
                ..FunctionConfig::default()
            },
        );
        let sealed = builder.add_function(
            Container::Class(shape),
            "sealedHelper",
            FunctionConfig {
                modality: Some(Modality::Final),
                has_body: true,
                ..FunctionConfig::default()
            },
        );
        let module = builder.finish();

        expect!["fun area()"].assert_eq(&render(&module, area, Some(shape)));
        expect!["fun describe()"].assert_eq(&render(&module, describe, Some(shape)));
        expect!["final fun sealedHelper()"].assert_eq(&render(&module, sealed, Some(shape)));
    }

    #[test]
    fn test_override_hides_modality() {
        let mut builder = ModuleBuilder::new();
        let open = builder.add_class(
            Container::Package("test"),
            "Impl",
            ClassConfig {
                modality: Some(Modality::Open),
                ..ClassConfig::default()
            },
        );
        let function = builder.add_function(
            Container::Class(open),
            "run",
            FunctionConfig {
                override_keyword: true,
                modality: Some(Modality::Final),
                has_body: true,
                ..FunctionConfig::default()
            },
        );
        let module = builder.finish();
        expect!["override fun run()"].assert_eq(&render(&module, function, Some(open)));
    }

    #[test]
    fn test_property_with_receiver_and_modifiers() {
        let mut builder = ModuleBuilder::new();
        let string = builder.ty("kotlin/String");
        let property = builder.add_property(
            Container::Package("test"),
            "lastChar",
            builder.ty("kotlin/Char"),
            PropertyConfig {
                receiver: Some(string.into()),
                ..PropertyConfig::default()
            },
        );
        let constant = builder.add_property(
            Container::Package("test"),
            "LIMIT",
            builder.ty("kotlin/Int"),
            PropertyConfig {
                visibility: Visibility::Private,
                modifiers: modifiers(&[Modifier::Const]),
                ..PropertyConfig::default()
            },
        );
        let late = builder.add_property(
            Container::Package("test"),
            "name",
            builder.ty("kotlin/String"),
            PropertyConfig {
                is_var: true,
                modifiers: modifiers(&[Modifier::Lateinit]),
                ..PropertyConfig::default()
            },
        );
        let module = builder.finish();

        expect!["val kotlin.String.lastChar: kotlin.Char"].assert_eq(&render(&module, property, None));
        expect!["private const val LIMIT: kotlin.Int"].assert_eq(&render(&module, constant, None));
        expect!["lateinit var name: kotlin.String"].assert_eq(&render(&module, late, None));
    }

    #[test]
    fn test_accessors_need_a_property() {
        let mut builder = ModuleBuilder::new();
        let property = builder.add_property(
            Container::Package("test"),
            "size",
            builder.ty("kotlin/Int"),
            PropertyConfig {
                is_var: true,
                ..PropertyConfig::default()
            },
        );
        let getter = builder.add_getter(property, AccessorConfig::default());
        let setter = builder.add_setter(
            property,
            AccessorConfig {
                visibility: Visibility::Private,
                ..AccessorConfig::default()
            },
        );
        let module = builder.finish();
        let options = RendererOptions::default();

        expect!["get"].assert_eq(&render(&module, getter, Some(property)));
        expect!["private set"].assert_eq(&render(&module, setter, Some(property)));
        assert_eq!(
            DeclarationRenderer::render(&module, getter, None, &options),
            Err(RenderError::AccessorOutsideProperty { containing: "nothing" })
        );
    }

    #[test]
    fn test_constructors() {
        let mut builder = ModuleBuilder::new();
        let class = builder.add_class(Container::Package("test"), "Box", ClassConfig::default());
        builder.add_type_parameter(class, "T", TypeParameterConfig::default());
        let primary = builder.add_constructor(
            class,
            ConstructorConfig {
                is_primary: true,
                ..ConstructorConfig::default()
            },
        );
        let value = builder.add_value_parameter(
            primary,
            "value",
            builder.type_parameter_ty("T"),
            ValueParameterConfig {
                is_var: true,
                ..ValueParameterConfig::default()
            },
        );
        let function = builder.add_function(Container::Package("test"), "make", FunctionConfig::default());
        let object = builder.add_anonymous_object(Container::Body(function), Vec::new());
        let anonymous = builder.add_constructor(object, ConstructorConfig::default());
        let module = builder.finish();
        let options = RendererOptions::default();

        expect!["constructor Box<T>(var value: T)"].assert_eq(&render(&module, primary, Some(class)));
        expect!["value-parameter var value: T"].assert_eq(&render(&module, value, Some(primary)));
        expect!["constructor <no name provided>()"].assert_eq(&render(&module, anonymous, Some(object)));
        assert_eq!(
            DeclarationRenderer::render(&module, primary, Some(function), &options),
            Err(RenderError::ConstructorOutsideClass {
                containing: "function"
            })
        );
    }

    #[test]
    fn test_nested_blocks() {
        let mut builder = ModuleBuilder::new();
        let outer = builder.add_class(Container::Package("test"), "Outer", ClassConfig::default());
        let function = builder.add_function(
            Container::Class(outer),
            "work",
            FunctionConfig {
                has_body: true,
                ..FunctionConfig::default()
            },
        );
        builder.add_expression(function);
        builder.add_class(Container::Body(function), "Local", ClassConfig::default());
        let empty = builder.add_class(Container::Package("test"), "Empty", ClassConfig::default());
        let quiet = builder.add_function(
            Container::Class(empty),
            "quiet",
            FunctionConfig {
                has_body: true,
                ..FunctionConfig::default()
            },
        );
        builder.add_expression(quiet);
        let module = builder.finish();
        let nested = RendererOptions::default().with_containing_declarations(true);

        expect![[r#"
            class Outer {
                fun work() {
                    local class Local
                }
            }"#]]
        .assert_eq(&render_with(&module, outer, None, &nested));
        expect![[r#"
            class Empty {
                fun quiet()
            }"#]]
        .assert_eq(&render_with(&module, empty, None, &nested));
        expect!["class Outer"].assert_eq(&render(&module, outer, None));
    }

    #[test]
    fn test_annotations_are_opt_in() {
        let mut builder = ModuleBuilder::new();
        let deprecated = builder.annotation("kotlin/Deprecated", &["\"old\""]);
        let mut receiver_annotation = builder.annotation("kotlin/Suppress", &[]);
        receiver_annotation.use_site = Some(AnnotationUseSite::Receiver);
        let function = builder.add_function(
            Container::Package("test"),
            "legacy",
            FunctionConfig {
                annotations: vec![deprecated, receiver_annotation],
                receiver: Some(builder.ty("kotlin/Int").into()),
                ..FunctionConfig::default()
            },
        );
        let module = builder.finish();
        let everything = RendererOptions::everything();

        expect!["fun kotlin.Int.legacy()"].assert_eq(&render(&module, function, None));
        expect![[r#"@kotlin.Deprecated("old") fun @receiver:kotlin.Suppress kotlin.Int.legacy()"#]]
            .assert_eq(&render_with(&module, function, None, &everything));
    }

    #[test]
    fn test_keyword_names_are_quoted() {
        let mut builder = ModuleBuilder::new();
        let function = builder.add_function(Container::Package("test"), "object", FunctionConfig::default());
        let module = builder.finish();
        expect!["fun `object`()"].assert_eq(&render(&module, function, None));
    }
}
