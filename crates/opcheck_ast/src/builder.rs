//! Arena-backed tree construction.
//!
//! Trees are normally produced by a front end; the builder constructs them
//! directly, assigning each leaf a fresh source range so diagnostics on
//! different nodes stay distinguishable and sortable.

use crate::node::*;
use crate::operator::BinaryOperator;
use bumpalo::Bump;
use opcheck_core::intern::StringInterner;
use opcheck_core::text::TextRange;
use std::cell::Cell;

pub struct AstBuilder<'a, 'i> {
    arena: &'a Bump,
    interner: &'i StringInterner,
    cursor: Cell<u32>,
}

impl<'a, 'i> AstBuilder<'a, 'i> {
    /// Create a builder allocating into `arena`.
    pub fn new(arena: &'a Bump, interner: &'i StringInterner) -> Self {
        Self {
            arena,
            interner,
            cursor: Cell::new(0),
        }
    }

    /// The interner names and literals go through.
    pub fn interner(&self) -> &'i StringInterner {
        self.interner
    }

    /// Reserve `len` bytes of source text for a leaf node.
    fn leaf_data(&self, len: usize) -> NodeData {
        let pos = self.cursor.get();
        let end = pos + len as u32;
        // One separator byte between leaves.
        self.cursor.set(end + 1);
        NodeData::new(pos, end)
    }

    fn alloc(&self, expr: Expression<'a>) -> &'a Expression<'a> {
        self.arena.alloc(expr)
    }

    // ========================================================================
    // Leaves
    // ========================================================================

    /// `$name` as an expression.
    pub fn variable(&self, name: &str) -> &'a Expression<'a> {
        self.alloc(Expression::Variable(self.variable_node(name)))
    }

    /// `$name` as a bare node, for assignment targets.
    pub fn variable_node(&self, name: &str) -> Variable {
        Variable {
            data: self.leaf_data(name.len() + 1),
            name: self.interner.intern(name),
        }
    }

    /// An integer literal.
    pub fn int(&self, value: i64) -> &'a Expression<'a> {
        let data = self.leaf_data(value.to_string().len());
        self.alloc(Expression::IntLiteral(IntLiteral { data, value }))
    }

    /// A float literal.
    pub fn float(&self, value: f64) -> &'a Expression<'a> {
        let data = self.leaf_data(value.to_string().len());
        self.alloc(Expression::FloatLiteral(FloatLiteral { data, value }))
    }

    /// A single-quoted string literal.
    pub fn string(&self, value: &str) -> &'a Expression<'a> {
        let data = self.leaf_data(value.len() + 2);
        self.alloc(Expression::StringLiteral(StringLiteral {
            data,
            value: self.interner.intern(value),
        }))
    }

    pub fn true_(&self) -> &'a Expression<'a> {
        self.alloc(Expression::TrueKeyword(self.leaf_data(4)))
    }

    pub fn false_(&self) -> &'a Expression<'a> {
        self.alloc(Expression::FalseKeyword(self.leaf_data(5)))
    }

    pub fn null(&self) -> &'a Expression<'a> {
        self.alloc(Expression::NullKeyword(self.leaf_data(4)))
    }

    // ========================================================================
    // Composites
    // ========================================================================

    /// A list literal `[a, b, ...]`.
    pub fn array(&self, items: Vec<&'a Expression<'a>>) -> &'a Expression<'a> {
        let range = match (items.first(), items.last()) {
            (Some(first), Some(last)) => first.range().cover(&last.range()),
            _ => self.leaf_data(2).range,
        };
        let items = self
            .arena
            .alloc_slice_fill_iter(items.into_iter().cloned());
        self.alloc(Expression::ArrayLiteral(ArrayLiteral {
            data: NodeData::new(range.pos, range.end),
            items,
        }))
    }

    /// `(expression)`.
    pub fn paren(&self, expression: &'a Expression<'a>) -> &'a Expression<'a> {
        let range = expression.range();
        self.alloc(Expression::Parenthesized(ParenthesizedExpression {
            data: NodeData::new(range.pos, range.end),
            expression,
        }))
    }

    /// `left op right`, including compound assignments.
    pub fn binary(
        &self,
        left: &'a Expression<'a>,
        operator: BinaryOperator,
        right: &'a Expression<'a>,
    ) -> &'a Expression<'a> {
        let range: TextRange = left.range().cover(&right.range());
        self.alloc(Expression::Binary(BinaryExpression {
            data: NodeData::new(range.pos, range.end),
            left,
            operator,
            right,
        }))
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// `expression;`.
    pub fn expression_statement(&self, expression: &'a Expression<'a>) -> Statement<'a> {
        let range = expression.range();
        Statement::Expression(ExpressionStatement {
            data: NodeData::new(range.pos, range.end),
            expression,
        })
    }

    /// `$name = expression;`.
    pub fn assign(&self, name: &str, expression: &'a Expression<'a>) -> Statement<'a> {
        let target = self.variable_node(name);
        let range = target.data.range.cover(&expression.range());
        Statement::Assign(AssignStatement {
            data: NodeData::new(range.pos, range.end),
            target,
            expression,
        })
    }

    /// A source unit named `file_name`.
    pub fn unit(&self, file_name: &str, statements: Vec<Statement<'a>>) -> SourceUnit<'a> {
        SourceUnit {
            file_name: file_name.to_string(),
            statements: self.arena.alloc_slice_fill_iter(statements),
        }
    }
}
