//! Visitor trait for traversing the tree.
//!
//! Default implementations walk into children. Override a `visit_*` method
//! and call the matching `walk_*` function to keep descending.

use crate::node::*;

pub trait AstVisitor<'a> {
    fn visit_unit(&mut self, unit: &SourceUnit<'a>) {
        for stmt in unit.statements.iter() {
            self.visit_statement(stmt);
        }
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        walk_statement(self, stmt);
    }

    fn visit_expression(&mut self, expr: &Expression<'a>) {
        walk_expression(self, expr);
    }
}

/// Visit the expression a statement holds.
pub fn walk_statement<'a, V: AstVisitor<'a> + ?Sized>(visitor: &mut V, stmt: &Statement<'a>) {
    match stmt {
        Statement::Expression(n) => visitor.visit_expression(n.expression),
        Statement::Assign(n) => visitor.visit_expression(n.expression),
    }
}

/// Visit the direct children of `expr`, left to right.
pub fn walk_expression<'a, V: AstVisitor<'a> + ?Sized>(visitor: &mut V, expr: &Expression<'a>) {
    match expr {
        Expression::Variable(_)
        | Expression::IntLiteral(_)
        | Expression::FloatLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::TrueKeyword(_)
        | Expression::FalseKeyword(_)
        | Expression::NullKeyword(_) => {}
        Expression::ArrayLiteral(n) => {
            for item in n.items.iter() {
                visitor.visit_expression(item);
            }
        }
        Expression::Parenthesized(n) => visitor.visit_expression(n.expression),
        Expression::Binary(n) => {
            visitor.visit_expression(n.left);
            visitor.visit_expression(n.right);
        }
    }
}
