//! Interned names and literal text.
//!
//! Every scope is keyed by variable name, and the checker derives a fresh
//! scope for each operation it re-checks. Names are interned once so those
//! lookups and copies only move `u32` handles around.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// Handle to a string held by a [`StringInterner`].
///
/// Handles from the same interner (or any of its clones) are equal exactly
/// when their text is equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InternedString").field(&self.0).finish()
    }
}

/// Shared, thread-safe name table.
///
/// Clones point at the same table. Units checked on different threads
/// intern into it concurrently, and placeholder names interned by a rule
/// resolve through the printer's clone.
#[derive(Clone, Default)]
pub struct StringInterner {
    table: Arc<ThreadedRodeo>,
}

impl StringInterner {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The handle for `text`, adding it on first use.
    #[inline]
    pub fn intern(&self, text: &str) -> InternedString {
        InternedString(self.table.get_or_intern(text))
    }

    /// Like [`intern`](Self::intern), without copying `text`.
    #[inline]
    pub fn intern_static(&self, text: &'static str) -> InternedString {
        InternedString(self.table.get_or_intern_static(text))
    }

    /// The text behind `name`.
    ///
    /// `name` must come from this table or one of its clones.
    #[inline]
    pub fn resolve(&self, name: InternedString) -> &str {
        self.table.resolve(&name.0)
    }

    /// Number of distinct strings held.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_same_handle() {
        let interner = StringInterner::new();
        let first = interner.intern("arr");
        let again = interner.intern("arr");
        let other = interner.intern("n");

        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(interner.resolve(other), "n");
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_clones_share_the_table() {
        let interner = StringInterner::new();
        assert!(interner.is_empty());
        let shared = interner.clone();
        let placeholder = shared.intern_static("__placeholder__");

        assert_eq!(interner.intern("__placeholder__"), placeholder);
        assert_eq!(interner.resolve(placeholder), "__placeholder__");
    }
}
