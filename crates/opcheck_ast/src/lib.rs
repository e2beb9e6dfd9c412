//! opcheck_ast: Expression tree definitions for operator checking.
//!
//! Defines the statement and expression nodes the checker walks, the closed
//! set of binary operators (plain and compound-assignment forms), node
//! flags, a visitor trait, and an arena-backed builder for constructing
//! trees in memory.

pub mod builder;
pub mod node;
pub mod operator;
pub mod visitor;

// Re-export key types
pub use builder::AstBuilder;
pub use node::*;
pub use operator::BinaryOperator;
