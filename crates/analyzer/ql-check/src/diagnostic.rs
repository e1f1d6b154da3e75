//! Diagnostics and the sink checkers report to

use ql_span::SourceLocation;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Suspicious code that still compiles
    Warning,
    /// Code that must be fixed
    Error,
}

/// Language rule a diagnostic reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    /// A `fun interface` must declare exactly one abstract function
    FunInterfaceWrongCountOfAbstractMembers,
    /// A `fun interface` cannot declare abstract properties
    FunInterfaceCannotHaveAbstractProperties,
    /// The single abstract function of a `fun interface` cannot be generic
    FunInterfaceAbstractMethodWithTypeParameters,
    /// The single abstract function of a `fun interface` cannot suspend
    FunInterfaceWithSuspendFunction,
    /// Parameters of the single abstract function cannot have default values
    FunInterfaceAbstractMethodWithDefaultValue,
    /// Several inherited implementations of one member conflict
    ManyImplMemberNotImplemented,
    /// An interface implementation conflicts with another abstract declaration
    ManyInterfacesMemberNotImplemented,
    /// An inherited abstract member has no implementation
    AbstractMemberNotImplemented,
}

impl DiagnosticKind {
    /// Stable upper-case code
    pub fn code(self) -> &'static str {
        match self {
            Self::FunInterfaceWrongCountOfAbstractMembers => "FUN_INTERFACE_WRONG_COUNT_OF_ABSTRACT_MEMBERS",
            Self::FunInterfaceCannotHaveAbstractProperties => "FUN_INTERFACE_CANNOT_HAVE_ABSTRACT_PROPERTIES",
            Self::FunInterfaceAbstractMethodWithTypeParameters => {
                "FUN_INTERFACE_ABSTRACT_METHOD_WITH_TYPE_PARAMETERS"
            }
            Self::FunInterfaceWithSuspendFunction => "FUN_INTERFACE_WITH_SUSPEND_FUNCTION",
            Self::FunInterfaceAbstractMethodWithDefaultValue => "FUN_INTERFACE_ABSTRACT_METHOD_WITH_DEFAULT_VALUE",
            Self::ManyImplMemberNotImplemented => "MANY_IMPL_MEMBER_NOT_IMPLEMENTED",
            Self::ManyInterfacesMemberNotImplemented => "MANY_INTERFACES_MEMBER_NOT_IMPLEMENTED",
            Self::AbstractMemberNotImplemented => "ABSTRACT_MEMBER_NOT_IMPLEMENTED",
        }
    }

    /// Severity every diagnostic of this kind is reported with
    pub fn severity(self) -> Severity {
        Severity::Error
    }

    /// Human-readable message, filled with the diagnostic argument if any
    pub fn message(self, argument: Option<&str>) -> String {
        let member = argument.unwrap_or("member");
        match self {
            Self::FunInterfaceWrongCountOfAbstractMembers => {
                "Fun interfaces must have exactly one abstract method".to_string()
            }
            Self::FunInterfaceCannotHaveAbstractProperties => {
                "Fun interfaces cannot have abstract properties".to_string()
            }
            Self::FunInterfaceAbstractMethodWithTypeParameters => {
                "Single abstract member cannot declare type parameters".to_string()
            }
            Self::FunInterfaceWithSuspendFunction => {
                "Fun interfaces cannot have abstract suspend functions".to_string()
            }
            Self::FunInterfaceAbstractMethodWithDefaultValue => {
                "Single abstract member cannot declare default values".to_string()
            }
            Self::ManyImplMemberNotImplemented => {
                format!("Class inherits many implementations of '{member}' and must override it")
            }
            Self::ManyInterfacesMemberNotImplemented => {
                format!("Class inherits conflicting declarations of '{member}' and must override it")
            }
            Self::AbstractMemberNotImplemented => {
                format!("Class is not abstract and does not implement abstract member '{member}'")
            }
        }
    }
}

/// A reported diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule that was violated
    pub kind: DiagnosticKind,
    /// Severity level
    pub severity: Severity,
    /// Location of the offending declaration, type parameter or value parameter
    pub source: SourceLocation,
    /// Extra detail, such as the name of the offending member
    pub argument: Option<String>,
}

impl Diagnostic {
    /// Human-readable message
    pub fn message(&self) -> String {
        self.kind.message(self.argument.as_deref())
    }
}

/// Sink for diagnostics
pub trait DiagnosticReporter {
    /// Report `kind` at `source`
    fn report(&mut self, source: SourceLocation, kind: DiagnosticKind, argument: Option<String>);
}

/// Reporter that keeps every diagnostic in emission order
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create an empty collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all diagnostics
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take all diagnostics
    #[must_use]
    pub fn take_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Diagnostics of one kind
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |diagnostic| diagnostic.kind == kind)
    }

    /// Whether nothing was reported
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticReporter for DiagnosticCollector {
    fn report(&mut self, source: SourceLocation, kind: DiagnosticKind, argument: Option<String>) {
        debug!(code = kind.code(), %source, "diagnostic reported");
        self.diagnostics.push(Diagnostic {
            kind,
            severity: kind.severity(),
            source,
            argument,
        });
    }
}
