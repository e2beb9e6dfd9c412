//! Node rules.
//!
//! A rule inspects one expression in one scope and returns the text of
//! every problem it finds there. The [`Checker`](crate::Checker) decides
//! where in the tree a rule runs and wraps its messages into diagnostics.

mod invalid_binary_operation;

pub use invalid_binary_operation::{
    acceptance_predicate, bitwise_ambiguity, InvalidBinaryOperationRule, OperatorCategory,
};

use crate::scope::Scope;
use opcheck_ast::node::Expression;
use opcheck_diagnostics::DiagnosticMessage;

pub trait Rule: Send + Sync {
    /// A stable identifier, used in logs.
    fn name(&self) -> &'static str;

    /// The template every message of this rule is produced from.
    fn message(&self) -> &'static DiagnosticMessage;

    /// Inspect `expr` in `scope`. Must not depend on anything but its
    /// arguments.
    fn process_node(&self, expr: &Expression<'_>, scope: &Scope) -> Vec<String>;
}
