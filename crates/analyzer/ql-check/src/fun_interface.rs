//! Checks of `fun interface` declarations
//!
//! A functional interface must have exactly one abstract function, inherited
//! or declared, which can be converted from a lambda. That function cannot be
//! generic, cannot suspend and cannot declare default parameter values, and the
//! interface cannot declare abstract properties.

use ql_decl::{DeclId, Declaration, Modifier, RegularClass, ResolutionSession, SimpleFunction};
use tracing::trace;

use crate::checker::{CheckerContext, RegularClassChecker};
use crate::diagnostic::{DiagnosticKind, DiagnosticReporter};

/// Checker for the single abstract member of `fun interface` declarations
pub struct FunInterfaceDeclarationChecker;

impl RegularClassChecker for FunInterfaceDeclarationChecker {
    fn name(&self) -> &str {
        "fun-interface"
    }

    fn check(
        &self,
        _class_id: DeclId,
        class: &RegularClass,
        ctx: &CheckerContext<'_>,
        reporter: &mut dyn DiagnosticReporter,
    ) {
        if !class.is_interface() || !class.status.has(Modifier::Fun) {
            return;
        }
        let session = ctx.session;

        let mut candidate = inherited_abstract_function(session, class);
        for &member in &class.members {
            match session.declaration(member) {
                Declaration::SimpleFunction(function) if function.status.is_abstract() => {
                    if candidate.is_some() {
                        reporter.report(
                            class.source,
                            DiagnosticKind::FunInterfaceWrongCountOfAbstractMembers,
                            None,
                        );
                    } else {
                        candidate = Some(function);
                    }
                }
                Declaration::Property(property) if property.status.is_abstract() => {
                    reporter.report(
                        property.source,
                        DiagnosticKind::FunInterfaceCannotHaveAbstractProperties,
                        None,
                    );
                }
                _ => {}
            }
        }

        let Some(function) = candidate else {
            reporter.report(
                class.source,
                DiagnosticKind::FunInterfaceWrongCountOfAbstractMembers,
                None,
            );
            return;
        };

        if let Some(&first) = function.type_parameters.first() {
            reporter.report(
                session.declaration(first).source(),
                DiagnosticKind::FunInterfaceAbstractMethodWithTypeParameters,
                None,
            );
        } else if function.status.has(Modifier::Suspend) {
            reporter.report(function.source, DiagnosticKind::FunInterfaceWithSuspendFunction, None);
        }

        let defaulted = function
            .value_parameters
            .iter()
            .filter_map(|&parameter| session.declaration(parameter).as_value_parameter())
            .filter(|parameter| parameter.has_default_value);
        for parameter in defaulted {
            reporter.report(
                parameter.source,
                DiagnosticKind::FunInterfaceAbstractMethodWithDefaultValue,
                None,
            );
        }
    }
}

/// First abstract function declared by a direct supertype
fn inherited_abstract_function<'a>(
    session: &'a dyn ResolutionSession,
    class: &RegularClass,
) -> Option<&'a SimpleFunction> {
    class.supertypes.iter().find_map(|supertype| {
        let Some((_, supertype)) = session.regular_class(&supertype.ty) else {
            trace!("unresolved supertype skipped");
            return None;
        };
        supertype.members.iter().find_map(|&member| {
            session
                .declaration(member)
                .as_simple_function()
                .filter(|function| function.status.is_abstract())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticCollector;
    use ql_decl::{
        ClassConfig, ClassKind, Container, FunctionConfig, ModuleBuilder, PropertyConfig,
        ResolvedModule, TypeParameterConfig, ValueParameterConfig, modifiers,
    };
    use ql_span::SourceLocation;

    fn fun_interface(builder: &mut ModuleBuilder, name: &str) -> DeclId {
        builder.add_class(
            Container::Package("test"),
            name,
            ClassConfig {
                kind: ClassKind::Interface,
                modifiers: modifiers(&[Modifier::Fun]),
                ..ClassConfig::default()
            },
        )
    }

    fn abstract_function(builder: &mut ModuleBuilder, owner: DeclId, name: &str) -> DeclId {
        builder.add_function(Container::Class(owner), name, FunctionConfig::default())
    }

    fn check(module: &ResolvedModule) -> Vec<(DiagnosticKind, SourceLocation)> {
        let mut collector = DiagnosticCollector::new();
        for (id, declaration) in module.iter() {
            if let Declaration::RegularClass(class) = declaration {
                let ctx = CheckerContext {
                    session: module,
                    scope: ql_decl::DeclarationScope::new(None),
                };
                FunInterfaceDeclarationChecker.check(id, class, &ctx, &mut collector);
            }
        }
        collector
            .take_diagnostics()
            .into_iter()
            .map(|diagnostic| (diagnostic.kind, diagnostic.source))
            .collect()
    }

    #[test]
    fn test_single_abstract_function_is_accepted() {
        let mut builder = ModuleBuilder::new();
        let action = fun_interface(&mut builder, "Action");
        abstract_function(&mut builder, action, "run");
        builder.add_function(
            Container::Class(action),
            "describe",
            FunctionConfig {
                has_body: true,
                ..FunctionConfig::default()
            },
        );
        assert!(check(&builder.finish()).is_empty());
    }

    #[test]
    fn test_plain_interface_is_ignored() {
        let mut builder = ModuleBuilder::new();
        builder.add_class(
            Container::Package("test"),
            "Empty",
            ClassConfig {
                kind: ClassKind::Interface,
                ..ClassConfig::default()
            },
        );
        assert!(check(&builder.finish()).is_empty());
    }

    #[test]
    fn test_no_abstract_function() {
        let mut builder = ModuleBuilder::new();
        let empty = fun_interface(&mut builder, "Empty");
        let location = builder.declaration(empty).source();
        assert_eq!(
            check(&builder.finish()),
            [(DiagnosticKind::FunInterfaceWrongCountOfAbstractMembers, location)]
        );
    }

    #[test]
    fn test_two_abstract_functions_report_once_at_interface() {
        let mut builder = ModuleBuilder::new();
        let pair = fun_interface(&mut builder, "Pair");
        abstract_function(&mut builder, pair, "f");
        abstract_function(&mut builder, pair, "g");
        let location = builder.declaration(pair).source();
        assert_eq!(
            check(&builder.finish()),
            [(DiagnosticKind::FunInterfaceWrongCountOfAbstractMembers, location)]
        );
    }

    #[test]
    fn test_inherited_function_is_the_candidate() {
        let mut builder = ModuleBuilder::new();
        let base = builder.add_class(
            Container::Package("test"),
            "Base",
            ClassConfig {
                kind: ClassKind::Interface,
                ..ClassConfig::default()
            },
        );
        abstract_function(&mut builder, base, "invoke");
        let base_ty = builder.class_type(base);
        let derived = builder.add_class(
            Container::Package("test"),
            "Derived",
            ClassConfig {
                kind: ClassKind::Interface,
                modifiers: modifiers(&[Modifier::Fun]),
                supertypes: vec![base_ty.into()],
                ..ClassConfig::default()
            },
        );
        let extra = abstract_function(&mut builder, derived, "other");
        let location = builder.declaration(derived).source();
        let extra_location = builder.declaration(extra).source();

        let diagnostics = check(&builder.finish());
        assert_eq!(
            diagnostics,
            [(DiagnosticKind::FunInterfaceWrongCountOfAbstractMembers, location)]
        );
        assert_ne!(diagnostics[0].1, extra_location);
    }

    #[test]
    fn test_abstract_property_reported_at_property() {
        let mut builder = ModuleBuilder::new();
        let holder = fun_interface(&mut builder, "Holder");
        abstract_function(&mut builder, holder, "run");
        let int = builder.ty("kotlin/Int");
        let property = builder.add_property(Container::Class(holder), "size", int, PropertyConfig::default());
        let location = builder.declaration(property).source();
        assert_eq!(
            check(&builder.finish()),
            [(DiagnosticKind::FunInterfaceCannotHaveAbstractProperties, location)]
        );
    }

    #[test]
    fn test_default_value_reported_at_parameter() {
        let mut builder = ModuleBuilder::new();
        let handler = fun_interface(&mut builder, "Handler");
        let handle = abstract_function(&mut builder, handler, "handle");
        let int = builder.ty("kotlin/Int");
        builder.add_value_parameter(handle, "code", int.clone(), ValueParameterConfig::default());
        let defaulted = builder.add_value_parameter(
            handle,
            "retries",
            int,
            ValueParameterConfig {
                has_default_value: true,
                ..ValueParameterConfig::default()
            },
        );
        let location = builder.declaration(defaulted).source();
        assert_eq!(
            check(&builder.finish()),
            [(DiagnosticKind::FunInterfaceAbstractMethodWithDefaultValue, location)]
        );
    }

    #[test]
    fn test_type_parameters_take_precedence_over_suspend() {
        let mut builder = ModuleBuilder::new();
        let mapper = fun_interface(&mut builder, "Mapper");
        let map = builder.add_function(
            Container::Class(mapper),
            "map",
            FunctionConfig {
                modifiers: modifiers(&[Modifier::Suspend]),
                ..FunctionConfig::default()
            },
        );
        let first = builder.add_type_parameter(map, "T", TypeParameterConfig::default());
        builder.add_type_parameter(map, "R", TypeParameterConfig::default());
        let location = builder.declaration(first).source();
        assert_eq!(
            check(&builder.finish()),
            [(DiagnosticKind::FunInterfaceAbstractMethodWithTypeParameters, location)]
        );
    }

    #[test]
    fn test_suspend_function_reported_at_function() {
        let mut builder = ModuleBuilder::new();
        let task = fun_interface(&mut builder, "Task");
        let run = builder.add_function(
            Container::Class(task),
            "run",
            FunctionConfig {
                modifiers: modifiers(&[Modifier::Suspend]),
                ..FunctionConfig::default()
            },
        );
        let location = builder.declaration(run).source();
        assert_eq!(
            check(&builder.finish()),
            [(DiagnosticKind::FunInterfaceWithSuspendFunction, location)]
        );
    }
}
