//! Three-valued logic for type relations.

use std::fmt;

/// The answer to a question about a static type: definitely not, possibly,
/// or definitely.
///
/// Variants are ordered `No < Maybe < Yes`, so `and` is the minimum and `or`
/// the maximum of its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrinaryLogic {
    No,
    Maybe,
    Yes,
}

impl TrinaryLogic {
    /// `Yes` for `true`, `No` for `false`.
    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value {
            TrinaryLogic::Yes
        } else {
            TrinaryLogic::No
        }
    }

    #[inline]
    pub fn yes(self) -> bool {
        self == TrinaryLogic::Yes
    }

    #[inline]
    pub fn maybe(self) -> bool {
        self == TrinaryLogic::Maybe
    }

    #[inline]
    pub fn no(self) -> bool {
        self == TrinaryLogic::No
    }

    /// Swaps `Yes` and `No`; `Maybe` stays.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        match self {
            TrinaryLogic::No => TrinaryLogic::Yes,
            TrinaryLogic::Maybe => TrinaryLogic::Maybe,
            TrinaryLogic::Yes => TrinaryLogic::No,
        }
    }

    /// The weaker of the two.
    pub fn and(self, other: Self) -> Self {
        self.min(other)
    }

    /// The stronger of the two.
    pub fn or(self, other: Self) -> Self {
        self.max(other)
    }

    /// `Yes` iff both are `Yes`, `No` iff both are `No`, otherwise `Maybe`.
    pub fn extreme_identity(a: Self, b: Self) -> Self {
        if a == b {
            a
        } else {
            TrinaryLogic::Maybe
        }
    }

    /// N-ary [`extreme_identity`](Self::extreme_identity). An empty input
    /// yields `Yes`.
    pub fn extreme_identity_all(values: impl IntoIterator<Item = Self>) -> Self {
        let mut values = values.into_iter();
        let Some(first) = values.next() else {
            return TrinaryLogic::Yes;
        };
        values.fold(first, Self::extreme_identity)
    }

    /// `or` over all values; `No` for an empty input.
    pub fn max_all(values: impl IntoIterator<Item = Self>) -> Self {
        values.into_iter().fold(TrinaryLogic::No, Self::or)
    }
}

impl fmt::Display for TrinaryLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrinaryLogic::No => write!(f, "No"),
            TrinaryLogic::Maybe => write!(f, "Maybe"),
            TrinaryLogic::Yes => write!(f, "Yes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TrinaryLogic::{self, Maybe, No, Yes};

    #[test]
    fn test_and_or_not() {
        assert_eq!(Yes.and(Maybe), Maybe);
        assert_eq!(No.and(Yes), No);
        assert_eq!(Maybe.or(No), Maybe);
        assert_eq!(No.or(Yes), Yes);
        assert_eq!(Yes.not(), No);
        assert_eq!(Maybe.not(), Maybe);
    }

    #[test]
    fn test_extreme_identity() {
        assert_eq!(TrinaryLogic::extreme_identity(Yes, Yes), Yes);
        assert_eq!(TrinaryLogic::extreme_identity(No, No), No);
        assert_eq!(TrinaryLogic::extreme_identity(Yes, No), Maybe);
        assert_eq!(TrinaryLogic::extreme_identity(Maybe, Maybe), Maybe);
        assert_eq!(TrinaryLogic::extreme_identity_all([Yes, Yes, No]), Maybe);
        assert_eq!(TrinaryLogic::extreme_identity_all([No, No]), No);
    }

    #[test]
    fn test_display() {
        assert_eq!(Maybe.to_string(), "Maybe");
        assert_eq!(TrinaryLogic::from_bool(true).to_string(), "Yes");
    }
}
