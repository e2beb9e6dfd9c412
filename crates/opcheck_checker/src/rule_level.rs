//! Strictness-aware operand narrowing.

use crate::combinator;
use crate::oracle::TypeOracle;
use crate::scope::Scope;
use crate::types::Type;
use opcheck_ast::node::Expression;
use opcheck_options::ResolvedOptions;

/// Decides which part of an operand's type a rule should check, according to
/// the configured strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleLevelHelper {
    /// Keep `null` in operand types instead of stripping it.
    pub check_nullables: bool,
    /// Check the whole union instead of only the members a rule accepts.
    pub check_union_types: bool,
}

impl RuleLevelHelper {
    pub fn new(check_nullables: bool, check_union_types: bool) -> Self {
        Self {
            check_nullables,
            check_union_types,
        }
    }

    /// The strictness `options` ask for.
    pub fn from_options(options: &ResolvedOptions) -> Self {
        Self::new(options.check_nullables, options.check_union_types)
    }

    /// The type of `expr` narrowed to the members that satisfy `accepts`.
    ///
    /// Returns `Type::Error` when there is too little information to report
    /// anything (the type is unknown, `mixed` or `never`). A type with no
    /// acceptable member comes back unchanged, so the caller's re-check
    /// still sees the failure.
    pub fn find_type_to_check(
        &self,
        oracle: &dyn TypeOracle,
        scope: &Scope,
        expr: &Expression<'_>,
        accepts: &dyn Fn(&Type) -> bool,
    ) -> Type {
        let mut ty = oracle.type_of(scope, expr);
        if !self.check_nullables && !ty.is_null() {
            ty = combinator::remove_null(&ty);
        }

        if matches!(ty, Type::Error | Type::Mixed | Type::Never) {
            return Type::Error;
        }

        if !self.check_union_types {
            if let Some(u) = ty.as_union() {
                let accepted: Vec<Type> = u
                    .types()
                    .iter()
                    .filter(|member| accepts(*member))
                    .cloned()
                    .collect();
                if !accepted.is_empty() {
                    return combinator::union(accepted);
                }
            }
        }

        ty
    }
}
