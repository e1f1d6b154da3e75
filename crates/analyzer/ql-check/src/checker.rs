//! Class checker infrastructure

use std::convert::Infallible;

use ql_decl::{DeclId, DeclarationScope, DeclarationVisitor, RegularClass, ResolutionSession, ResolvedModule};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::diagnostic::DiagnosticReporter;
use crate::fun_interface::FunInterfaceDeclarationChecker;
use crate::supertype_members::SupertypeMemberChecker;

/// Context a checker runs in
#[derive(Clone, Copy)]
pub struct CheckerContext<'a> {
    /// Session the checked declarations live in
    pub session: &'a dyn ResolutionSession,
    /// Containing declaration of the checked class
    pub scope: DeclarationScope,
}

/// Trait for checkers of class-like declarations
pub trait RegularClassChecker {
    /// Checker name
    fn name(&self) -> &str;

    /// Check one class, reporting every violation found
    fn check(
        &self,
        class_id: DeclId,
        class: &RegularClass,
        ctx: &CheckerContext<'_>,
        reporter: &mut dyn DiagnosticReporter,
    );
}

/// Switches for the built-in checkers
///
/// Every checker is enabled by default; a host can turn individual ones off
/// from its configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Run [`FunInterfaceDeclarationChecker`]
    pub fun_interface: bool,
    /// Run [`SupertypeMemberChecker`]
    pub supertype_members: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            fun_interface: true,
            supertype_members: true,
        }
    }
}

/// Registered checkers and the walk that runs them
pub struct DeclarationCheckers {
    class_checkers: Vec<Box<dyn RegularClassChecker>>,
}

impl DeclarationCheckers {
    /// Create the default checker set
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&CheckerConfig::default())
    }

    /// Create the checkers enabled in `config`
    #[must_use]
    pub fn from_config(config: &CheckerConfig) -> Self {
        let mut checkers = Self::with_checkers(Vec::new());
        if config.fun_interface {
            checkers.add_checker(Box::new(FunInterfaceDeclarationChecker));
        }
        if config.supertype_members {
            checkers.add_checker(Box::new(SupertypeMemberChecker));
        }
        checkers
    }

    /// Create a checker set with specific checkers
    #[must_use]
    pub fn with_checkers(class_checkers: Vec<Box<dyn RegularClassChecker>>) -> Self {
        Self { class_checkers }
    }

    /// Add a checker
    pub fn add_checker(&mut self, checker: Box<dyn RegularClassChecker>) {
        self.class_checkers.push(checker);
    }

    /// Check every declaration of `module`
    pub fn check_module(&self, module: &ResolvedModule, reporter: &mut dyn DiagnosticReporter) {
        self.check_declarations(module, module.roots(), None, reporter);
    }

    /// Check `ids` and everything nested in them
    ///
    /// Classes are visited in pre-order, members, local classes and anonymous
    /// object members included.
    pub fn check_declarations(
        &self,
        session: &dyn ResolutionSession,
        ids: &[DeclId],
        containing: Option<DeclId>,
        reporter: &mut dyn DiagnosticReporter,
    ) {
        let mut walker = CheckingWalker {
            checkers: &self.class_checkers,
            session,
            reporter,
        };
        let Ok(()) = walker.visit_all(ids, DeclarationScope::new(containing));
    }
}

impl Default for DeclarationCheckers {
    fn default() -> Self {
        Self::new()
    }
}

struct CheckingWalker<'a, 'c, 'r> {
    checkers: &'c [Box<dyn RegularClassChecker>],
    session: &'a dyn ResolutionSession,
    reporter: &'r mut dyn DiagnosticReporter,
}

impl<'a> DeclarationVisitor<'a> for CheckingWalker<'a, '_, '_> {
    type Error = Infallible;

    fn session(&self) -> &'a dyn ResolutionSession {
        self.session
    }

    fn visit_regular_class(
        &mut self,
        id: DeclId,
        class: &'a RegularClass,
        scope: DeclarationScope,
    ) -> Result<(), Infallible> {
        let ctx = CheckerContext {
            session: self.session,
            scope,
        };
        for checker in self.checkers {
            trace!(checker = checker.name(), "checking class");
            checker.check(id, class, &ctx, &mut *self.reporter);
        }

        let inner = scope.enter(id);
        self.visit_all(&class.type_parameters, inner)?;
        self.visit_all(&class.members, inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{DiagnosticCollector, DiagnosticKind};
    use ql_decl::{ClassConfig, Container, FunctionConfig, ModuleBuilder};

    /// Reports every class it sees, to observe the walk
    struct EveryClass;

    impl RegularClassChecker for EveryClass {
        fn name(&self) -> &str {
            "every-class"
        }

        fn check(
            &self,
            _class_id: DeclId,
            class: &RegularClass,
            ctx: &CheckerContext<'_>,
            reporter: &mut dyn DiagnosticReporter,
        ) {
            let name = ctx.session.interner().resolve(class.name).to_string();
            reporter.report(class.source, DiagnosticKind::AbstractMemberNotImplemented, Some(name));
        }
    }

    #[test]
    fn test_walk_reaches_nested_and_local_classes() {
        let mut builder = ModuleBuilder::new();
        let outer = builder.add_class(Container::Package("test"), "Outer", ClassConfig::default());
        builder.add_class(Container::Class(outer), "Nested", ClassConfig::default());
        let function = builder.add_function(
            Container::Class(outer),
            "make",
            FunctionConfig {
                has_body: true,
                ..FunctionConfig::default()
            },
        );
        builder.add_class(Container::Body(function), "Local", ClassConfig::default());
        builder.add_class(Container::Package("test"), "Second", ClassConfig::default());
        let module = builder.finish();

        let checkers = DeclarationCheckers::with_checkers(vec![Box::new(EveryClass)]);
        let mut collector = DiagnosticCollector::new();
        checkers.check_module(&module, &mut collector);

        let names: Vec<_> = collector
            .diagnostics()
            .iter()
            .filter_map(|diagnostic| diagnostic.argument.as_deref())
            .collect();
        assert_eq!(names, ["Outer", "Nested", "Local", "Second"]);
    }

    #[test]
    fn test_config_selects_checkers() {
        let config: CheckerConfig = toml::from_str("supertype_members = false").unwrap();
        assert!(config.fun_interface);
        assert!(!config.supertype_members);

        let checkers = DeclarationCheckers::from_config(&config);
        let names: Vec<_> = checkers.class_checkers.iter().map(|checker| checker.name()).collect();
        assert_eq!(names, ["fun-interface"]);
        assert_eq!(DeclarationCheckers::new().class_checkers.len(), 2);
    }
}
