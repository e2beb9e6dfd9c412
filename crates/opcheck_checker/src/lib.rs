//! opcheck_checker: Static checking of PHP binary operations.
//!
//! Holds the value-level type model and its three-valued relations, the
//! scope environment, the oracle that types expressions, the strictness
//! helper that narrows operand types, and the rules. The [`Checker`] ties
//! them together over whole source units.

mod checker;
pub mod combinator;
pub mod oracle;
pub mod rule_level;
pub mod rules;
pub mod scope;
pub mod trinary;
pub mod types;

pub use checker::Checker;
pub use oracle::{binary_operation_type, ExpressionTypeResolver, TypeOracle};
pub use rule_level::RuleLevelHelper;
pub use rules::{InvalidBinaryOperationRule, OperatorCategory, Rule};
pub use scope::{Scope, VariableTypeHolder};
pub use trinary::TrinaryLogic;
pub use types::{ArrayType, ObjectType, Type, UnionType, VerbosityLevel};
