//! opcheck_core: Core utilities shared by every opcheck crate.
//!
//! Provides string interning for variable names and string literals, and the
//! text span types that tie tree nodes and diagnostics back to source offsets.

pub mod intern;
pub mod text;

pub use intern::{InternedString, StringInterner};
pub use text::{TextPos, TextRange, TextSpan};
