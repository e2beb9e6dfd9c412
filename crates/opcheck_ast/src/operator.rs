//! The closed set of binary operators.
//!
//! Compound assignments (`$a .= $b`) are binary operators in their own right
//! and carry a link back to their plain form through
//! [`BinaryOperator::base_operator`].

use std::fmt;

/// A binary or compound-assignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BinaryOperator {
    // Arithmetic
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Pow,
    // String
    Concat,
    // Bitwise
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,
    // Boolean / logical
    BooleanAnd,
    BooleanOr,
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    Coalesce,
    // Comparison
    Equal,
    NotEqual,
    Identical,
    NotIdentical,
    Smaller,
    SmallerOrEqual,
    Greater,
    GreaterOrEqual,
    Spaceship,
    // Compound assignment
    PlusAssign,
    MinusAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    PowAssign,
    ConcatAssign,
    BitwiseAndAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    CoalesceAssign,
}

impl BinaryOperator {
    /// Every operator, plain forms first.
    pub const ALL: [BinaryOperator; 40] = [
        BinaryOperator::Plus,
        BinaryOperator::Minus,
        BinaryOperator::Mul,
        BinaryOperator::Div,
        BinaryOperator::Mod,
        BinaryOperator::Pow,
        BinaryOperator::Concat,
        BinaryOperator::BitwiseAnd,
        BinaryOperator::BitwiseOr,
        BinaryOperator::BitwiseXor,
        BinaryOperator::ShiftLeft,
        BinaryOperator::ShiftRight,
        BinaryOperator::BooleanAnd,
        BinaryOperator::BooleanOr,
        BinaryOperator::LogicalAnd,
        BinaryOperator::LogicalOr,
        BinaryOperator::LogicalXor,
        BinaryOperator::Coalesce,
        BinaryOperator::Equal,
        BinaryOperator::NotEqual,
        BinaryOperator::Identical,
        BinaryOperator::NotIdentical,
        BinaryOperator::Smaller,
        BinaryOperator::SmallerOrEqual,
        BinaryOperator::Greater,
        BinaryOperator::GreaterOrEqual,
        BinaryOperator::Spaceship,
        BinaryOperator::PlusAssign,
        BinaryOperator::MinusAssign,
        BinaryOperator::MulAssign,
        BinaryOperator::DivAssign,
        BinaryOperator::ModAssign,
        BinaryOperator::PowAssign,
        BinaryOperator::ConcatAssign,
        BinaryOperator::BitwiseAndAssign,
        BinaryOperator::BitwiseOrAssign,
        BinaryOperator::BitwiseXorAssign,
        BinaryOperator::ShiftLeftAssign,
        BinaryOperator::ShiftRightAssign,
        BinaryOperator::CoalesceAssign,
    ];

    /// The source token of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "**",
            BinaryOperator::Concat => ".",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::BooleanAnd => "&&",
            BinaryOperator::BooleanOr => "||",
            BinaryOperator::LogicalAnd => "and",
            BinaryOperator::LogicalOr => "or",
            BinaryOperator::LogicalXor => "xor",
            BinaryOperator::Coalesce => "??",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Identical => "===",
            BinaryOperator::NotIdentical => "!==",
            BinaryOperator::Smaller => "<",
            BinaryOperator::SmallerOrEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterOrEqual => ">=",
            BinaryOperator::Spaceship => "<=>",
            BinaryOperator::PlusAssign => "+=",
            BinaryOperator::MinusAssign => "-=",
            BinaryOperator::MulAssign => "*=",
            BinaryOperator::DivAssign => "/=",
            BinaryOperator::ModAssign => "%=",
            BinaryOperator::PowAssign => "**=",
            BinaryOperator::ConcatAssign => ".=",
            BinaryOperator::BitwiseAndAssign => "&=",
            BinaryOperator::BitwiseOrAssign => "|=",
            BinaryOperator::BitwiseXorAssign => "^=",
            BinaryOperator::ShiftLeftAssign => "<<=",
            BinaryOperator::ShiftRightAssign => ">>=",
            BinaryOperator::CoalesceAssign => "??=",
        }
    }

    /// The plain operator a compound assignment applies. Plain operators
    /// return themselves.
    pub fn base_operator(self) -> BinaryOperator {
        match self {
            BinaryOperator::PlusAssign => BinaryOperator::Plus,
            BinaryOperator::MinusAssign => BinaryOperator::Minus,
            BinaryOperator::MulAssign => BinaryOperator::Mul,
            BinaryOperator::DivAssign => BinaryOperator::Div,
            BinaryOperator::ModAssign => BinaryOperator::Mod,
            BinaryOperator::PowAssign => BinaryOperator::Pow,
            BinaryOperator::ConcatAssign => BinaryOperator::Concat,
            BinaryOperator::BitwiseAndAssign => BinaryOperator::BitwiseAnd,
            BinaryOperator::BitwiseOrAssign => BinaryOperator::BitwiseOr,
            BinaryOperator::BitwiseXorAssign => BinaryOperator::BitwiseXor,
            BinaryOperator::ShiftLeftAssign => BinaryOperator::ShiftLeft,
            BinaryOperator::ShiftRightAssign => BinaryOperator::ShiftRight,
            BinaryOperator::CoalesceAssign => BinaryOperator::Coalesce,
            plain => plain,
        }
    }

    /// Whether this is an `op=` form.
    #[inline]
    pub fn is_compound_assignment(self) -> bool {
        self.base_operator() != self
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BinaryOperator::ConcatAssign, BinaryOperator::Concat)]
    #[case(BinaryOperator::BitwiseXorAssign, BinaryOperator::BitwiseXor)]
    #[case(BinaryOperator::CoalesceAssign, BinaryOperator::Coalesce)]
    #[case(BinaryOperator::Plus, BinaryOperator::Plus)]
    #[case(BinaryOperator::Spaceship, BinaryOperator::Spaceship)]
    fn test_base_operator(#[case] op: BinaryOperator, #[case] base: BinaryOperator) {
        assert_eq!(op.base_operator(), base);
    }

    #[test]
    fn test_compound_tokens_extend_base_tokens() {
        for op in BinaryOperator::ALL {
            if op.is_compound_assignment() {
                assert_eq!(op.as_str(), format!("{}=", op.base_operator().as_str()));
                assert!(!op.base_operator().is_compound_assignment());
            }
        }
    }

    #[test]
    fn test_all_is_distinct() {
        let mut seen = std::collections::HashSet::new();
        for op in BinaryOperator::ALL {
            assert!(seen.insert(op), "duplicate operator {:?}", op);
        }
        assert_eq!(seen.len(), 40);
    }
}
