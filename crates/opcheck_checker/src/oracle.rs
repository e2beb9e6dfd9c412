//! Expression typing.
//!
//! The rules never compute operator result types themselves; they ask a
//! [`TypeOracle`]. [`ExpressionTypeResolver`] is the reference oracle, and
//! [`binary_operation_type`] holds the operator typing it uses, separate from
//! any tree so it can be exercised on types alone.

use crate::combinator;
use crate::scope::Scope;
use crate::types::{ArrayType, Type};
use opcheck_ast::node::*;
use opcheck_ast::operator::BinaryOperator;
use opcheck_core::intern::StringInterner;

/// Answers "what is the static type of this expression in this scope".
///
/// Implementations must be deterministic for a fixed scope and expression,
/// and must type a synthesized node exactly like an original one.
pub trait TypeOracle: Send + Sync {
    fn type_of(&self, scope: &Scope, expr: &Expression<'_>) -> Type;
}

/// The reference oracle: literal types, scope lookups and PHP operator
/// semantics.
#[derive(Debug, Clone)]
pub struct ExpressionTypeResolver {
    interner: StringInterner,
}

impl ExpressionTypeResolver {
    /// Create a resolver reading string literals through `interner`.
    pub fn new(interner: StringInterner) -> Self {
        Self { interner }
    }
}

impl TypeOracle for ExpressionTypeResolver {
    fn type_of(&self, scope: &Scope, expr: &Expression<'_>) -> Type {
        match expr {
            Expression::Variable(n) => scope.variable_type(n.name).cloned().unwrap_or(Type::Error),
            Expression::IntLiteral(n) => Type::ConstantInt(n.value),
            Expression::FloatLiteral(n) => Type::ConstantFloat(n.value),
            Expression::StringLiteral(n) => Type::constant_string(self.interner.resolve(n.value)),
            Expression::TrueKeyword(_) => Type::ConstantBool(true),
            Expression::FalseKeyword(_) => Type::ConstantBool(false),
            Expression::NullKeyword(_) => Type::Null,
            Expression::ArrayLiteral(n) => {
                if n.items.is_empty() {
                    return Type::empty_array();
                }
                let item = combinator::union(
                    n.items.iter().map(|item| self.type_of(scope, item)).collect(),
                );
                if item.is_error() {
                    return Type::Error;
                }
                Type::array(Type::Int, item)
            }
            Expression::Parenthesized(n) => self.type_of(scope, n.expression),
            Expression::Binary(n) => {
                let left = self.type_of(scope, n.left);
                let right = self.type_of(scope, n.right);
                binary_operation_type(n.operator, &left, &right)
            }
        }
    }
}

/// The result type of `left <op> right`. Compound assignments type exactly
/// like their base operator.
pub fn binary_operation_type(op: BinaryOperator, left: &Type, right: &Type) -> Type {
    use BinaryOperator::*;

    match op {
        Concat | ConcatAssign => concat_type(left, right),
        BitwiseAnd | BitwiseOr | BitwiseXor | BitwiseAndAssign | BitwiseOrAssign
        | BitwiseXorAssign => {
            if is_definitely_string(left) && is_definitely_string(right) {
                Type::String
            } else {
                integer_operation_type(op.base_operator(), left, right)
            }
        }
        Mod | ShiftLeft | ShiftRight | ModAssign | ShiftLeftAssign | ShiftRightAssign => {
            integer_operation_type(op.base_operator(), left, right)
        }
        Plus | PlusAssign => {
            if let (Some(l), Some(r)) = (array_parts(left), array_parts(right)) {
                return merge_arrays(l.into_iter().chain(r));
            }
            arithmetic_type(Plus, left, right)
        }
        Minus | Mul | Div | Pow | MinusAssign | MulAssign | DivAssign | PowAssign => {
            arithmetic_type(op.base_operator(), left, right)
        }
        Coalesce | CoalesceAssign => {
            // An undefined left operand is exactly what `??` guards against.
            if left.is_error() {
                return right.clone();
            }
            combinator::union(vec![combinator::remove_null(left), right.clone()])
        }
        Spaceship => Type::Int,
        BooleanAnd | BooleanOr | LogicalAnd | LogicalOr | LogicalXor | Equal | NotEqual
        | Identical | NotIdentical | Smaller | SmallerOrEqual | Greater | GreaterOrEqual => {
            Type::Bool
        }
    }
}

fn is_definitely_string(ty: &Type) -> bool {
    Type::String.is_super_type_of(ty).yes()
}

fn concat_type(left: &Type, right: &Type) -> Type {
    let left = left.to_string_type();
    let right = right.to_string_type();
    if left.is_error() || right.is_error() {
        return Type::Error;
    }
    match (&left, &right) {
        (Type::ConstantString(a), Type::ConstantString(b)) => {
            Type::ConstantString(format!("{}{}", a, b))
        }
        _ => Type::String,
    }
}

/// The array members of `ty`, or `None` unless every member is an array.
fn array_parts(ty: &Type) -> Option<Vec<&ArrayType>> {
    if matches!(ty, Type::Never) {
        return None;
    }
    ty.members()
        .iter()
        .map(|member| match member {
            Type::Array(array) => Some(array),
            _ => None,
        })
        .collect()
}

fn merge_arrays<'t>(arrays: impl Iterator<Item = &'t ArrayType>) -> Type {
    let (keys, items): (Vec<Type>, Vec<Type>) = arrays
        .map(|array| (array.key.as_ref().clone(), array.item.as_ref().clone()))
        .unzip();
    Type::array(combinator::union(keys), combinator::union(items))
}

/// `% << >> & | ^` on numbers: always an int, or a guaranteed failure.
fn integer_operation_type(op: BinaryOperator, left: &Type, right: &Type) -> Type {
    let left = truncate_to_int(left.to_number());
    let right = truncate_to_int(right.to_number());
    if left.is_error() || right.is_error() {
        return Type::Error;
    }

    let (Type::ConstantInt(a), Type::ConstantInt(b)) = (&left, &right) else {
        if op == BinaryOperator::Mod && is_zero(&right) {
            return Type::Error;
        }
        return Type::Int;
    };
    let (a, b) = (*a, *b);
    let folded = match op {
        BinaryOperator::BitwiseAnd => Some(a & b),
        BinaryOperator::BitwiseOr => Some(a | b),
        BinaryOperator::BitwiseXor => Some(a ^ b),
        // Modulo by zero and negative shifts throw.
        BinaryOperator::Mod => {
            if b == 0 {
                return Type::Error;
            }
            Some(a.wrapping_rem(b))
        }
        BinaryOperator::ShiftLeft | BinaryOperator::ShiftRight if b < 0 => return Type::Error,
        BinaryOperator::ShiftLeft => Some(if b >= 64 { 0 } else { a.wrapping_shl(b as u32) }),
        BinaryOperator::ShiftRight => Some(if b >= 64 {
            if a < 0 {
                -1
            } else {
                0
            }
        } else {
            a >> b
        }),
        _ => None,
    };
    folded.map_or(Type::Int, Type::ConstantInt)
}

/// Integer operators see constant floats truncated towards zero. Floats
/// outside the `int` range become 0.
fn truncate_to_int(ty: Type) -> Type {
    match ty {
        Type::ConstantFloat(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Type::ConstantInt(f.trunc() as i64)
        }
        Type::ConstantFloat(_) => Type::ConstantInt(0),
        other => other,
    }
}

fn is_zero(ty: &Type) -> bool {
    matches!(ty, Type::ConstantInt(0)) || matches!(ty, Type::ConstantFloat(f) if *f == 0.0)
}

fn as_constant_float(ty: &Type) -> Option<f64> {
    match ty {
        Type::ConstantInt(n) => Some(*n as f64),
        Type::ConstantFloat(f) => Some(*f),
        _ => None,
    }
}

/// `+ - * / **` on numbers.
fn arithmetic_type(op: BinaryOperator, left: &Type, right: &Type) -> Type {
    let left = left.to_number();
    let right = right.to_number();
    if left.is_error() || right.is_error() {
        return Type::Error;
    }
    if op == BinaryOperator::Div && is_zero(&right) {
        return Type::Error;
    }

    if let (Type::ConstantInt(a), Type::ConstantInt(b)) = (&left, &right) {
        let (a, b) = (*a, *b);
        let checked = match op {
            BinaryOperator::Plus => a.checked_add(b),
            BinaryOperator::Minus => a.checked_sub(b),
            BinaryOperator::Mul => a.checked_mul(b),
            BinaryOperator::Div if a.checked_rem(b) == Some(0) => a.checked_div(b),
            BinaryOperator::Pow => u32::try_from(b).ok().and_then(|exp| a.checked_pow(exp)),
            _ => None,
        };
        if let Some(value) = checked {
            return Type::ConstantInt(value);
        }
    }

    if let (Some(a), Some(b)) = (as_constant_float(&left), as_constant_float(&right)) {
        let value = match op {
            BinaryOperator::Plus => a + b,
            BinaryOperator::Minus => a - b,
            BinaryOperator::Mul => a * b,
            BinaryOperator::Div => a / b,
            BinaryOperator::Pow => a.powf(b),
            _ => return Type::number(),
        };
        return Type::ConstantFloat(value);
    }

    let float = Type::Float;
    let int = Type::Int;
    if float.is_super_type_of(&left).yes() || float.is_super_type_of(&right).yes() {
        return Type::Float;
    }
    match op {
        BinaryOperator::Plus | BinaryOperator::Minus | BinaryOperator::Mul
            if int.is_super_type_of(&left).yes() && int.is_super_type_of(&right).yes() =>
        {
            Type::Int
        }
        _ => Type::number(),
    }
}
