//! Declaration checkers for resolved modules
//!
//! Checkers inspect each class of a module and report language rule
//! violations to a [`DiagnosticReporter`]. They never stop at the first
//! problem: every violation found is reported.

pub mod checker;
pub mod diagnostic;
pub mod fun_interface;
pub mod supertype_members;

pub use checker::{CheckerConfig, CheckerContext, DeclarationCheckers, RegularClassChecker};
pub use diagnostic::{Diagnostic, DiagnosticCollector, DiagnosticKind, DiagnosticReporter, Severity};
pub use fun_interface::FunInterfaceDeclarationChecker;
pub use supertype_members::SupertypeMemberChecker;
