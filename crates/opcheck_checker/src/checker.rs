//! The statement-level checker.
//!
//! Walks a unit's statements in order, threading a [`Scope`] from one
//! statement to the next, and offers every expression to every registered
//! rule. Children are offered before their parents.

use crate::oracle::{ExpressionTypeResolver, TypeOracle};
use crate::rule_level::RuleLevelHelper;
use crate::rules::{InvalidBinaryOperationRule, Rule};
use crate::scope::Scope;
use crate::trinary::TrinaryLogic;
use opcheck_ast::node::*;
use opcheck_ast::visitor::{walk_expression, AstVisitor};
use opcheck_core::intern::StringInterner;
use opcheck_diagnostics::{Diagnostic, DiagnosticCollection};
use opcheck_options::ResolvedOptions;
use std::sync::Arc;
use tracing::{debug, trace};

/// Runs rules over source units.
pub struct Checker {
    oracle: Arc<dyn TypeOracle>,
    rules: Vec<Box<dyn Rule>>,
}

impl Checker {
    /// A checker with no rules registered.
    pub fn new(oracle: Arc<dyn TypeOracle>) -> Self {
        Self {
            oracle,
            rules: Vec::new(),
        }
    }

    /// A checker using the reference oracle, with the rules `options`
    /// enable.
    pub fn with_options(options: &ResolvedOptions, interner: StringInterner) -> Self {
        let oracle: Arc<dyn TypeOracle> = Arc::new(ExpressionTypeResolver::new(interner.clone()));
        let mut checker = Self::new(Arc::clone(&oracle));
        if options.report_binary_operations {
            checker.register_rule(Box::new(InvalidBinaryOperationRule::new(
                oracle,
                RuleLevelHelper::from_options(options),
                interner,
            )));
        }
        checker
    }

    /// Add a rule; it runs after those already registered.
    pub fn register_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    /// The oracle every rule is typed against.
    pub fn oracle(&self) -> &dyn TypeOracle {
        self.oracle.as_ref()
    }

    /// Check every statement of `unit`, starting from `scope`.
    pub fn check_unit(&self, unit: &SourceUnit<'_>, scope: &Scope) -> DiagnosticCollection {
        let mut diagnostics = DiagnosticCollection::new();
        let mut scope = scope.clone();
        for stmt in unit.statements.iter() {
            scope = self.check_statement(stmt, &scope, &mut diagnostics);
        }
        debug!(
            file = %unit.file_name,
            statements = unit.statements.len(),
            diagnostics = diagnostics.len(),
            "checked unit"
        );
        diagnostics
    }

    /// Check one statement and return the scope that follows it.
    pub fn check_statement(
        &self,
        stmt: &Statement<'_>,
        scope: &Scope,
        diagnostics: &mut DiagnosticCollection,
    ) -> Scope {
        match stmt {
            Statement::Expression(n) => self.check_expression(n.expression, scope, diagnostics),
            Statement::Assign(n) => {
                let assigned = self.oracle.type_of(scope, n.expression);
                let after = self.check_expression(n.expression, scope, diagnostics);
                after.assign_variable(n.target.name, assigned, TrinaryLogic::Yes)
            }
        }
    }

    /// Offer `expr` and all its sub-expressions to the rules. Returns the
    /// scope after any compound assignments inside `expr`.
    pub fn check_expression(
        &self,
        expr: &Expression<'_>,
        scope: &Scope,
        diagnostics: &mut DiagnosticCollection,
    ) -> Scope {
        let mut dispatcher = RuleDispatcher {
            checker: self,
            scope: scope.clone(),
            diagnostics,
        };
        dispatcher.visit_expression(expr);
        dispatcher.scope
    }
}

/// Post-order walk that runs every rule on every expression.
struct RuleDispatcher<'c> {
    checker: &'c Checker,
    scope: Scope,
    diagnostics: &'c mut DiagnosticCollection,
}

impl<'a, 'c> AstVisitor<'a> for RuleDispatcher<'c> {
    fn visit_expression(&mut self, expr: &Expression<'a>) {
        // Rules see the scope the expression starts from. The oracle applies
        // nested compound assignments itself.
        let before = self.scope.clone();
        walk_expression(self, expr);

        for rule in &self.checker.rules {
            trace!(rule = rule.name(), "dispatching");
            for text in rule.process_node(expr, &before) {
                self.diagnostics.add(
                    Diagnostic::from_text(rule.message(), text).with_span(expr.range().to_span()),
                );
            }
        }

        // `$x op= y` leaves `$x` holding the operation's result.
        if let Expression::Binary(node) = expr {
            if !node.operator.is_compound_assignment() {
                return;
            }
            if let Expression::Variable(target) = node.left {
                let ty = self.checker.oracle.type_of(&before, expr);
                self.scope = self.scope.assign_variable(target.name, ty, TrinaryLogic::Yes);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;
    use bumpalo::Bump;
    use opcheck_ast::{AstBuilder, BinaryOperator};

    #[test]
    fn test_assign_binds_expression_type() {
        let arena = Bump::new();
        let interner = StringInterner::new();
        let b = AstBuilder::new(&arena, &interner);
        let checker = Checker::with_options(&ResolvedOptions::default(), interner.clone());

        let stmt = b.assign("x", b.binary(b.int(1), BinaryOperator::Plus, b.int(2)));
        let mut diagnostics = DiagnosticCollection::new();
        let scope = checker.check_statement(&stmt, &Scope::new(), &mut diagnostics);

        assert!(diagnostics.is_empty());
        assert_eq!(scope.variable_type(interner.intern("x")), Some(&Type::ConstantInt(3)));
    }

    #[test]
    fn test_compound_assignment_rebinds_target() {
        let arena = Bump::new();
        let interner = StringInterner::new();
        let b = AstBuilder::new(&arena, &interner);
        let checker = Checker::with_options(&ResolvedOptions::default(), interner.clone());
        let start = Scope::new().assign_variable(
            interner.intern("s"),
            Type::constant_string("a"),
            TrinaryLogic::Yes,
        );

        let expr = b.binary(b.variable("s"), BinaryOperator::ConcatAssign, b.string("b"));
        let mut diagnostics = DiagnosticCollection::new();
        let scope = checker.check_expression(expr, &start, &mut diagnostics);

        assert_eq!(scope.variable_type(interner.intern("s")), Some(&Type::constant_string("ab")));
        assert_eq!(
            start.variable_type(interner.intern("s")),
            Some(&Type::constant_string("a"))
        );
    }

    #[test]
    fn test_rules_follow_options() {
        let interner = StringInterner::new();
        let enabled = Checker::with_options(&ResolvedOptions::for_level(2), interner.clone());
        assert_eq!(enabled.rule_names().collect::<Vec<_>>(), vec!["invalidBinaryOperation"]);
        let disabled = Checker::with_options(&ResolvedOptions::for_level(1), interner);
        assert_eq!(disabled.rule_names().count(), 0);
    }
}
