//! Tree node definitions.
//!
//! Nodes reference child nodes via arena-allocated references, so a whole
//! unit is freed at once when its arena is dropped. The checker never
//! mutates a node; derived trees are built as fresh values that borrow the
//! unchanged parts of the original.

use crate::operator::BinaryOperator;
use opcheck_core::intern::InternedString;
use opcheck_core::text::TextRange;

bitflags::bitflags! {
    /// Flags for tree nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        const NONE          = 0;
        /// The node was created by analysis, not read from source.
        const SYNTHESIZED   = 1 << 0;
    }
}

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Source position range.
    pub range: TextRange,
    pub flags: NodeFlags,
}

impl NodeData {
    /// Data for a node parsed from `pos..end`.
    pub fn new(pos: u32, end: u32) -> Self {
        Self {
            range: TextRange::new(pos, end),
            flags: NodeFlags::NONE,
        }
    }

    /// Data for a node that has no source text of its own.
    pub fn synthesized() -> Self {
        Self {
            range: TextRange::empty(0),
            flags: NodeFlags::SYNTHESIZED,
        }
    }

    /// Whether the node was built by a rule rather than parsed.
    #[inline]
    pub fn is_synthesized(&self) -> bool {
        self.flags.contains(NodeFlags::SYNTHESIZED)
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Source Unit
// ============================================================================

/// One independently analysed unit of statements (a file or a function body).
#[derive(Debug)]
pub struct SourceUnit<'a> {
    pub file_name: String,
    pub statements: NodeList<'a, Statement<'a>>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug)]
pub enum Statement<'a> {
    Expression(ExpressionStatement<'a>),
    Assign(AssignStatement<'a>),
}

impl<'a> Statement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::Expression(n) => &n.data,
            Statement::Assign(n) => &n.data,
        }
    }
}

/// `expr;`
#[derive(Debug)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `$var = expr;`
#[derive(Debug)]
pub struct AssignStatement<'a> {
    pub data: NodeData,
    pub target: Variable,
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expression<'a> {
    Variable(Variable),
    IntLiteral(IntLiteral),
    FloatLiteral(FloatLiteral),
    StringLiteral(StringLiteral),
    TrueKeyword(NodeData),
    FalseKeyword(NodeData),
    NullKeyword(NodeData),
    ArrayLiteral(ArrayLiteral<'a>),
    Parenthesized(ParenthesizedExpression<'a>),
    Binary(BinaryExpression<'a>),
}

impl<'a> Expression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Variable(n) => &n.data,
            Expression::IntLiteral(n) => &n.data,
            Expression::FloatLiteral(n) => &n.data,
            Expression::StringLiteral(n) => &n.data,
            Expression::TrueKeyword(data)
            | Expression::FalseKeyword(data)
            | Expression::NullKeyword(data) => data,
            Expression::ArrayLiteral(n) => &n.data,
            Expression::Parenthesized(n) => &n.data,
            Expression::Binary(n) => &n.data,
        }
    }

    /// Source range of the expression.
    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }

    /// The binary operation node, if this is one.
    pub fn as_binary(&self) -> Option<&BinaryExpression<'a>> {
        match self {
            Expression::Binary(n) => Some(n),
            _ => None,
        }
    }
}

/// `$name`
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub data: NodeData,
    pub name: InternedString,
}

impl Variable {
    /// A variable reference with no source position.
    pub fn synthesized(name: InternedString) -> Self {
        Self {
            data: NodeData::synthesized(),
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntLiteral {
    pub data: NodeData,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub data: NodeData,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub data: NodeData,
    /// The unquoted, unescaped value.
    pub value: InternedString,
}

/// `[a, b, c]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral<'a> {
    pub data: NodeData,
    pub items: NodeList<'a, Expression<'a>>,
}

/// `(expr)`
#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `left <op> right`, including compound assignments where `left` is the
/// assignment target.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator: BinaryOperator,
    pub right: &'a Expression<'a>,
}

impl<'a> BinaryExpression<'a> {
    /// A synthesized copy of this expression with both operand slots
    /// replaced. The original node is left untouched.
    pub fn with_operands<'b>(
        &self,
        left: &'b Expression<'b>,
        right: &'b Expression<'b>,
    ) -> BinaryExpression<'b>
    where
        'a: 'b,
    {
        BinaryExpression {
            data: NodeData {
                range: self.data.range,
                flags: self.data.flags | NodeFlags::SYNTHESIZED,
            },
            left,
            operator: self.operator,
            right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opcheck_core::StringInterner;

    #[test]
    fn test_with_operands_leaves_original_untouched() {
        let interner = StringInterner::new();
        let a = Expression::Variable(Variable {
            data: NodeData::new(0, 2),
            name: interner.intern("a"),
        });
        let one = Expression::IntLiteral(IntLiteral {
            data: NodeData::new(5, 6),
            value: 1,
        });
        let original = BinaryExpression {
            data: NodeData::new(0, 6),
            left: &a,
            operator: BinaryOperator::Plus,
            right: &one,
        };

        let l = Expression::Variable(Variable::synthesized(interner.intern("l")));
        let r = Expression::Variable(Variable::synthesized(interner.intern("r")));
        let copy = original.with_operands(&l, &r);

        assert!(copy.data.is_synthesized());
        assert_eq!(copy.operator, BinaryOperator::Plus);
        assert_eq!(copy.left, &l);
        assert!(!original.data.is_synthesized());
        assert_eq!(original.left, &a);
        assert_eq!(original.right, &one);
    }
}
