//! The analysis environment at one program point.

use crate::oracle::TypeOracle;
use crate::trinary::TrinaryLogic;
use crate::types::Type;
use indexmap::IndexMap;
use opcheck_ast::node::Expression;
use opcheck_core::intern::InternedString;
use rustc_hash::FxBuildHasher;
use std::sync::Arc;

/// A variable's type and whether it is defined at all.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableTypeHolder {
    pub ty: Type,
    pub certainty: TrinaryLogic,
}

impl VariableTypeHolder {
    /// A holder for `ty` with the given certainty.
    pub fn new(ty: Type, certainty: TrinaryLogic) -> Self {
        Self { ty, certainty }
    }

    /// A variable that is certainly defined.
    pub fn defined(ty: Type) -> Self {
        Self::new(ty, TrinaryLogic::Yes)
    }
}

type VariableMap = IndexMap<InternedString, VariableTypeHolder, FxBuildHasher>;

/// Variable bindings visible at a program point.
///
/// A scope never changes once built. Deriving a new scope copies the
/// bindings; clones share them.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    variables: Arc<VariableMap>,
}

impl Scope {
    /// An empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope with `name` bound to `ty`, leaving `self` untouched.
    #[must_use]
    pub fn assign_variable(&self, name: InternedString, ty: Type, certainty: TrinaryLogic) -> Scope {
        let mut variables = VariableMap::clone(&self.variables);
        variables.insert(name, VariableTypeHolder::new(ty, certainty));
        Scope {
            variables: Arc::new(variables),
        }
    }

    /// How certainly `name` is defined here. `No` when it was never assigned.
    pub fn has_variable(&self, name: InternedString) -> TrinaryLogic {
        self.variables
            .get(&name)
            .map_or(TrinaryLogic::No, |holder| holder.certainty)
    }

    /// The bound type, or `None` when the variable is certainly undefined.
    pub fn variable_type(&self, name: InternedString) -> Option<&Type> {
        self.variables
            .get(&name)
            .filter(|holder| !holder.certainty.no())
            .map(|holder| &holder.ty)
    }

    /// Every bound name, in order of first assignment.
    pub fn variable_names(&self) -> impl Iterator<Item = InternedString> + '_ {
        self.variables.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Shorthand for `oracle.type_of(self, expr)`.
    pub fn get_type(&self, oracle: &dyn TypeOracle, expr: &Expression<'_>) -> Type {
        oracle.type_of(self, expr)
    }
}
