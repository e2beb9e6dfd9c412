//! Reports binary operations whose operands can never be combined.
//!
//! A report needs two things. First, the oracle types the whole expression as
//! an error. Second, the error survives narrowing both operands to the members
//! the operator can actually work with. The second step keeps
//! `string|array . 'x'` quiet while `array . 'x'` is reported.

use super::Rule;
use crate::oracle::TypeOracle;
use crate::rule_level::RuleLevelHelper;
use crate::scope::Scope;
use crate::trinary::TrinaryLogic;
use crate::types::{Type, VerbosityLevel};
use opcheck_ast::node::{BinaryExpression, Expression, Variable};
use opcheck_ast::operator::BinaryOperator;
use opcheck_core::intern::{InternedString, StringInterner};
use opcheck_diagnostics::messages;
use opcheck_diagnostics::DiagnosticMessage;
use opcheck_printer::Printer;
use std::sync::Arc;
use tracing::trace;

/// How an operator interprets its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorCategory {
    /// `.` and `.=`: both operands are converted to strings.
    Concatenation,
    /// `& | ^` and their assignments: byte-wise on two strings, numeric
    /// otherwise.
    Bitwise,
    /// Everything else: operands are converted to numbers.
    Default,
}

impl OperatorCategory {
    /// Classify `op`. Compound forms share their base operator's category.
    pub fn of(op: BinaryOperator) -> Self {
        use BinaryOperator::*;

        match op {
            Concat | ConcatAssign => OperatorCategory::Concatenation,
            BitwiseAnd | BitwiseOr | BitwiseXor | BitwiseAndAssign | BitwiseOrAssign
            | BitwiseXorAssign => OperatorCategory::Bitwise,
            Plus | Minus | Mul | Div | Mod | Pow | ShiftLeft | ShiftRight | BooleanAnd
            | BooleanOr | LogicalAnd | LogicalOr | LogicalXor | Coalesce | Equal | NotEqual
            | Identical | NotIdentical | Smaller | SmallerOrEqual | Greater | GreaterOrEqual
            | Spaceship | PlusAssign | MinusAssign | MulAssign | DivAssign | ModAssign
            | PowAssign | ShiftLeftAssign | ShiftRightAssign | CoalesceAssign => {
                OperatorCategory::Default
            }
        }
    }
}

/// Which operand types an operator of `category` can work with.
///
/// `ambiguity` only matters for [`OperatorCategory::Bitwise`]: `Yes` rules
/// out the numeric reading, `No` rules out the string reading.
pub fn acceptance_predicate(
    category: OperatorCategory,
    ambiguity: TrinaryLogic,
) -> impl Fn(&Type) -> bool {
    move |ty: &Type| match category {
        OperatorCategory::Concatenation => !ty.to_string_type().is_error(),
        OperatorCategory::Bitwise => {
            (!ambiguity.no() && !ty.is_super_type_of(&Type::String).no())
                || (!ambiguity.yes() && !ty.to_number().is_error())
        }
        OperatorCategory::Default => !ty.to_number().is_error(),
    }
}

/// Whether a bitwise operator with `left` on its left side works on bytes.
///
/// `Yes` when `left` covers every string and fails numeric coercion, `No`
/// when it shares nothing with `string` and converts to a number.
pub fn bitwise_ambiguity(left: &Type) -> TrinaryLogic {
    TrinaryLogic::extreme_identity(
        left.is_super_type_of(&Type::String),
        TrinaryLogic::from_bool(left.to_number().is_error()),
    )
}

pub struct InvalidBinaryOperationRule {
    oracle: Arc<dyn TypeOracle>,
    rule_level_helper: RuleLevelHelper,
    interner: StringInterner,
    left_placeholder: InternedString,
    right_placeholder: InternedString,
}

impl InvalidBinaryOperationRule {
    /// Reserved variable names for the re-check. Source variables can never
    /// be spelled this way by convention.
    pub const LEFT_PLACEHOLDER: &'static str = "__OPCHECK_LEFT__";
    pub const RIGHT_PLACEHOLDER: &'static str = "__OPCHECK_RIGHT__";

    /// Create the rule. Placeholder names are interned up front.
    pub fn new(
        oracle: Arc<dyn TypeOracle>,
        rule_level_helper: RuleLevelHelper,
        interner: StringInterner,
    ) -> Self {
        let left_placeholder = interner.intern_static(Self::LEFT_PLACEHOLDER);
        let right_placeholder = interner.intern_static(Self::RIGHT_PLACEHOLDER);
        Self {
            oracle,
            rule_level_helper,
            interner,
            left_placeholder,
            right_placeholder,
        }
    }

    fn check_binary(
        &self,
        expr: &Expression<'_>,
        node: &BinaryExpression<'_>,
        scope: &Scope,
    ) -> Option<String> {
        let oracle = self.oracle.as_ref();
        if !oracle.type_of(scope, expr).is_error() {
            return None;
        }

        let category = OperatorCategory::of(node.operator);
        let left_accepts = acceptance_predicate(category, TrinaryLogic::Maybe);
        let left_type =
            self.rule_level_helper
                .find_type_to_check(oracle, scope, node.left, &left_accepts);
        if left_type.is_error() {
            trace!(operator = %node.operator, "left operand has no checkable type");
            return None;
        }

        let ambiguity = if category == OperatorCategory::Bitwise {
            bitwise_ambiguity(&left_type)
        } else {
            TrinaryLogic::Maybe
        };
        let right_accepts = acceptance_predicate(category, ambiguity);
        let right_type =
            self.rule_level_helper
                .find_type_to_check(oracle, scope, node.right, &right_accepts);
        if right_type.is_error() {
            trace!(operator = %node.operator, "right operand has no checkable type");
            return None;
        }

        let left_var = Expression::Variable(Variable::synthesized(self.left_placeholder));
        let right_var = Expression::Variable(Variable::synthesized(self.right_placeholder));
        let placeholder_expr = Expression::Binary(node.with_operands(&left_var, &right_var));
        let placeholder_scope = scope
            .assign_variable(self.left_placeholder, left_type, TrinaryLogic::Yes)
            .assign_variable(self.right_placeholder, right_type, TrinaryLogic::Yes);

        if !oracle.type_of(&placeholder_scope, &placeholder_expr).is_error() {
            trace!(
                operator = %node.operator,
                "operation succeeds on narrowed operands"
            );
            return None;
        }

        let operator = self.operator_text(&placeholder_expr, node.operator);
        let left_description = oracle
            .type_of(scope, node.left)
            .describe(VerbosityLevel::Value);
        let right_description = oracle
            .type_of(scope, node.right)
            .describe(VerbosityLevel::Value);

        Some(
            messages::BINARY_OPERATION_0_BETWEEN_1_AND_2_RESULTS_IN_AN_ERROR.format(&[
                &operator,
                &left_description,
                &right_description,
            ]),
        )
    }

    /// The operator as written, recovered from the printed placeholder
    /// expression.
    fn operator_text(&self, placeholder_expr: &Expression<'_>, fallback: BinaryOperator) -> String {
        let printed = Printer::new(&self.interner).print_expr(placeholder_expr);
        let prefix = format!("${} ", Self::LEFT_PLACEHOLDER);
        let suffix = format!(" ${}", Self::RIGHT_PLACEHOLDER);
        printed
            .strip_prefix(prefix.as_str())
            .and_then(|rest| rest.strip_suffix(suffix.as_str()))
            .map_or_else(|| fallback.as_str().to_string(), str::to_string)
    }
}

impl Rule for InvalidBinaryOperationRule {
    fn name(&self) -> &'static str {
        "invalidBinaryOperation"
    }

    fn message(&self) -> &'static DiagnosticMessage {
        &messages::BINARY_OPERATION_0_BETWEEN_1_AND_2_RESULTS_IN_AN_ERROR
    }

    fn process_node(&self, expr: &Expression<'_>, scope: &Scope) -> Vec<String> {
        let Some(node) = expr.as_binary() else {
            return Vec::new();
        };
        self.check_binary(expr, node, scope).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::union;
    use rstest::rstest;
    use TrinaryLogic::{Maybe, No, Yes};

    // ========================================================================
    // Operator classification
    // ========================================================================

    #[rstest]
    #[case(BinaryOperator::Concat, OperatorCategory::Concatenation)]
    #[case(BinaryOperator::ConcatAssign, OperatorCategory::Concatenation)]
    #[case(BinaryOperator::BitwiseAnd, OperatorCategory::Bitwise)]
    #[case(BinaryOperator::BitwiseOrAssign, OperatorCategory::Bitwise)]
    #[case(BinaryOperator::BitwiseXor, OperatorCategory::Bitwise)]
    #[case(BinaryOperator::ShiftLeft, OperatorCategory::Default)]
    #[case(BinaryOperator::Plus, OperatorCategory::Default)]
    #[case(BinaryOperator::Spaceship, OperatorCategory::Default)]
    #[case(BinaryOperator::CoalesceAssign, OperatorCategory::Default)]
    fn test_operator_category(#[case] op: BinaryOperator, #[case] expected: OperatorCategory) {
        assert_eq!(OperatorCategory::of(op), expected);
    }

    #[test]
    fn test_compound_forms_share_category() {
        for op in BinaryOperator::ALL {
            assert_eq!(
                OperatorCategory::of(op),
                OperatorCategory::of(op.base_operator()),
                "{}",
                op
            );
        }
    }

    // ========================================================================
    // Acceptance predicates
    // ========================================================================

    #[test]
    fn test_concatenation_predicate() {
        let accepts = acceptance_predicate(OperatorCategory::Concatenation, Maybe);
        assert!(accepts(&Type::Int));
        assert!(accepts(&Type::Null));
        assert!(accepts(&Type::stringable_object("Foo")));
        assert!(!accepts(&Type::object("Foo")));
        assert!(!accepts(&Type::empty_array()));
    }

    #[test]
    fn test_default_predicate() {
        let accepts = acceptance_predicate(OperatorCategory::Default, Yes);
        assert!(accepts(&Type::String));
        assert!(accepts(&Type::Bool));
        assert!(!accepts(&Type::constant_string("abc")));
        assert!(!accepts(&Type::object("Foo")));
    }

    #[test]
    fn test_bitwise_predicate_follows_ambiguity() {
        let either = acceptance_predicate(OperatorCategory::Bitwise, Maybe);
        assert!(either(&Type::String));
        assert!(either(&Type::Int));
        assert!(!either(&Type::empty_array()));

        let string_only = acceptance_predicate(OperatorCategory::Bitwise, Yes);
        assert!(string_only(&Type::String));
        assert!(string_only(&Type::constant_string("x")));
        assert!(!string_only(&Type::Int));

        let numeric_only = acceptance_predicate(OperatorCategory::Bitwise, No);
        assert!(numeric_only(&Type::Int));
        assert!(numeric_only(&Type::String));
        assert!(!numeric_only(&Type::constant_string("abc")));
    }

    // ========================================================================
    // Ambiguity
    // ========================================================================

    #[rstest]
    #[case(union(vec![Type::String, Type::empty_array()]), Yes)]
    #[case(union(vec![Type::String, Type::object("Foo")]), Yes)]
    #[case(Type::Int, No)]
    #[case(Type::Float, No)]
    #[case(Type::constant_string("abc"), Maybe)]
    #[case(union(vec![Type::constant_string("a"), Type::constant_string("b")]), Maybe)]
    #[case(union(vec![Type::String, Type::Int]), Maybe)]
    #[case(Type::String, Maybe)]
    #[case(Type::constant_string("12"), Maybe)]
    #[case(Type::empty_array(), Maybe)]
    fn test_bitwise_ambiguity(#[case] left: Type, #[case] expected: TrinaryLogic) {
        assert_eq!(bitwise_ambiguity(&left), expected);
    }
}
