//! Type system representation.
//!
//! Types are plain values. Scopes, the oracle and the rules pass them around
//! by clone, so nothing here borrows from a tree or an arena and every type
//! can cross threads freely.

use crate::combinator;
use crate::trinary::TrinaryLogic;
use opcheck_printer::{format_float, quote_string};
use std::fmt;

/// A static type.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Any value; nothing is known about it.
    Mixed,
    /// No value; the expression never completes.
    Never,
    /// The sentinel for a guaranteed failure. Absorbs every operation that
    /// touches it.
    Error,
    Null,
    Bool,
    ConstantBool(bool),
    Int,
    ConstantInt(i64),
    Float,
    ConstantFloat(f64),
    String,
    /// A string with a value known at analysis time.
    ConstantString(String),
    Array(ArrayType),
    Object(ObjectType),
    Resource,
    Union(UnionType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub key: Box<Type>,
    pub item: Box<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub class_name: String,
    /// Whether instances convert to string (the class defines `__toString`).
    pub stringable: bool,
}

/// Two or more members, none of which covers another.
///
/// Only [`combinator::union`] constructs these, so a `UnionType` is always
/// flat and normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    types: Vec<Type>,
}

impl UnionType {
    pub(crate) fn new(types: Vec<Type>) -> Self {
        debug_assert!(types.len() >= 2);
        Self { types }
    }

    /// The members, flattened and without duplicates.
    pub fn types(&self) -> &[Type] {
        &self.types
    }
}

/// How much detail [`Type::describe`] renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Constants render as their general type.
    TypeOnly,
    /// Constants render as their value.
    Value,
}

impl Type {
    // ========================================================================
    // Construction
    // ========================================================================

    /// `array<key, item>`.
    pub fn array(key: Type, item: Type) -> Self {
        Type::Array(ArrayType {
            key: Box::new(key),
            item: Box::new(item),
        })
    }

    /// The type of `[]`.
    pub fn empty_array() -> Self {
        Self::array(Type::Never, Type::Never)
    }

    /// An instance of `class_name` without `__toString`.
    pub fn object(class_name: impl Into<String>) -> Self {
        Type::Object(ObjectType {
            class_name: class_name.into(),
            stringable: false,
        })
    }

    /// An instance of `class_name` that defines `__toString`.
    pub fn stringable_object(class_name: impl Into<String>) -> Self {
        Type::Object(ObjectType {
            class_name: class_name.into(),
            stringable: true,
        })
    }

    /// The literal string `value`.
    pub fn constant_string(value: impl Into<String>) -> Self {
        Type::ConstantString(value.into())
    }

    /// `int|float`
    pub fn number() -> Self {
        combinator::union(vec![Type::Int, Type::Float])
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Type::Null)
    }

    /// The union, if this type is one.
    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            Type::Union(u) => Some(u),
            _ => None,
        }
    }

    /// The members of a union, or the type itself as a single member.
    pub fn members(&self) -> &[Type] {
        match self {
            Type::Union(u) => u.types(),
            other => std::slice::from_ref(other),
        }
    }

    /// Whether every value of `other` is a value of `self`.
    pub fn is_super_type_of(&self, other: &Type) -> TrinaryLogic {
        match (self, other) {
            (Type::Mixed, _) => TrinaryLogic::Yes,
            (Type::Error, _) | (_, Type::Error) => TrinaryLogic::No,
            (_, Type::Never) => TrinaryLogic::Yes,
            (Type::Never, _) => TrinaryLogic::No,
            (_, Type::Union(source)) => TrinaryLogic::extreme_identity_all(
                source.types().iter().map(|member| self.is_super_type_of(member)),
            ),
            (Type::Union(target), _) => TrinaryLogic::max_all(
                target.types().iter().map(|member| member.is_super_type_of(other)),
            ),
            (_, Type::Mixed) => TrinaryLogic::Maybe,

            (Type::Null, Type::Null) => TrinaryLogic::Yes,
            (Type::Resource, Type::Resource) => TrinaryLogic::Yes,

            (Type::Bool, Type::Bool | Type::ConstantBool(_)) => TrinaryLogic::Yes,
            (Type::ConstantBool(a), Type::ConstantBool(b)) => TrinaryLogic::from_bool(a == b),
            (Type::ConstantBool(_), Type::Bool) => TrinaryLogic::Maybe,

            (Type::Int, Type::Int | Type::ConstantInt(_)) => TrinaryLogic::Yes,
            (Type::ConstantInt(a), Type::ConstantInt(b)) => TrinaryLogic::from_bool(a == b),
            (Type::ConstantInt(_), Type::Int) => TrinaryLogic::Maybe,

            (Type::Float, Type::Float | Type::ConstantFloat(_)) => TrinaryLogic::Yes,
            (Type::ConstantFloat(a), Type::ConstantFloat(b)) => TrinaryLogic::from_bool(a == b),
            (Type::ConstantFloat(_), Type::Float) => TrinaryLogic::Maybe,

            (Type::String, Type::String | Type::ConstantString(_)) => TrinaryLogic::Yes,
            (Type::ConstantString(a), Type::ConstantString(b)) => TrinaryLogic::from_bool(a == b),
            (Type::ConstantString(_), Type::String) => TrinaryLogic::Maybe,

            (Type::Array(target), Type::Array(source)) => target
                .key
                .is_super_type_of(&source.key)
                .and(target.item.is_super_type_of(&source.item)),

            // Class names are case-insensitive.
            (Type::Object(target), Type::Object(source)) => TrinaryLogic::from_bool(
                target.class_name.eq_ignore_ascii_case(&source.class_name),
            ),

            _ => TrinaryLogic::No,
        }
    }

    // ========================================================================
    // Coercions
    // ========================================================================

    /// The type of this value after arithmetic coercion. `Error` when the
    /// coercion is guaranteed to fail.
    pub fn to_number(&self) -> Type {
        match self {
            Type::Mixed | Type::String => Type::number(),
            Type::Never => Type::Never,
            Type::Error => Type::Error,
            Type::Null => Type::ConstantInt(0),
            Type::Bool => Type::Int,
            Type::ConstantBool(value) => Type::ConstantInt(i64::from(*value)),
            Type::Int | Type::ConstantInt(_) | Type::Float | Type::ConstantFloat(_) => self.clone(),
            Type::ConstantString(text) => parse_numeric(text).unwrap_or(Type::Error),
            Type::Array(_) | Type::Object(_) => Type::Error,
            Type::Resource => Type::Int,
            Type::Union(u) => combinator::union(u.types().iter().map(Type::to_number).collect()),
        }
    }

    /// The type of this value after string coercion. `Error` when the
    /// coercion is guaranteed to fail.
    pub fn to_string_type(&self) -> Type {
        match self {
            Type::Mixed | Type::Bool | Type::Int | Type::Float | Type::Resource => Type::String,
            Type::String | Type::ConstantString(_) => self.clone(),
            Type::Never => Type::Never,
            Type::Error => Type::Error,
            Type::Null | Type::ConstantBool(false) => Type::constant_string(""),
            Type::ConstantBool(true) => Type::constant_string("1"),
            Type::ConstantInt(value) => Type::ConstantString(value.to_string()),
            Type::ConstantFloat(value) => Type::ConstantString(float_to_string(*value)),
            Type::Array(_) => Type::Error,
            Type::Object(object) => {
                if object.stringable {
                    Type::String
                } else {
                    Type::Error
                }
            }
            Type::Union(u) => {
                combinator::union(u.types().iter().map(Type::to_string_type).collect())
            }
        }
    }

    // ========================================================================
    // Display
    // ========================================================================

    /// Human-readable form used in diagnostics.
    pub fn describe(&self, level: VerbosityLevel) -> String {
        let value = level == VerbosityLevel::Value;
        match self {
            Type::Mixed => "mixed".to_string(),
            Type::Never => "*NEVER*".to_string(),
            Type::Error => "*ERROR*".to_string(),
            Type::Null => "null".to_string(),
            Type::Bool => "bool".to_string(),
            Type::ConstantBool(b) if value => b.to_string(),
            Type::ConstantBool(_) => "bool".to_string(),
            Type::Int => "int".to_string(),
            Type::ConstantInt(n) if value => n.to_string(),
            Type::ConstantInt(_) => "int".to_string(),
            Type::Float => "float".to_string(),
            Type::ConstantFloat(f) if value => format_float(*f),
            Type::ConstantFloat(_) => "float".to_string(),
            Type::String => "string".to_string(),
            Type::ConstantString(s) if value => quote_string(s),
            Type::ConstantString(_) => "string".to_string(),
            Type::Array(array) => describe_array(array, level),
            Type::Object(object) => object.class_name.clone(),
            Type::Resource => "resource".to_string(),
            Type::Union(u) => {
                let mut parts: Vec<String> = Vec::with_capacity(u.types().len());
                for member in u.types() {
                    let part = member.describe(level);
                    // Distinct constants can collapse to the same general name.
                    if !parts.contains(&part) {
                        parts.push(part);
                    }
                }
                parts.join("|")
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(VerbosityLevel::Value))
    }
}

fn describe_array(array: &ArrayType, level: VerbosityLevel) -> String {
    if level == VerbosityLevel::TypeOnly {
        return "array".to_string();
    }
    match (array.key.as_ref(), array.item.as_ref()) {
        (Type::Never, Type::Never) => "array()".to_string(),
        (Type::Mixed, Type::Mixed) => "array".to_string(),
        (Type::Mixed, item) => format!("array<{}>", item.describe(level)),
        (key, item) => format!("array<{}, {}>", key.describe(level), item.describe(level)),
    }
}

/// PHP renders integral floats without a fractional part when converting to
/// string.
fn float_to_string(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Parse a numeric string into a constant number type.
///
/// Accepts surrounding whitespace, an optional sign, digits with an optional
/// fraction and an optional exponent. Anything else is non-numeric.
pub fn parse_numeric(text: &str) -> Option<Type> {
    let trimmed = text.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C'));
    let bytes = trimmed.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    let mut is_float = false;

    if i < bytes.len() && bytes[i] == b'.' {
        is_float = true;
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return None;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        is_float = true;
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
    }
    if i != bytes.len() {
        return None;
    }

    if !is_float {
        if let Ok(value) = trimmed.parse::<i64>() {
            return Some(Type::ConstantInt(value));
        }
    }
    trimmed.parse::<f64>().ok().map(Type::ConstantFloat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trinary::TrinaryLogic::{Maybe, No, Yes};

    fn union(types: Vec<Type>) -> Type {
        combinator::union(types)
    }

    // ========================================================================
    // Relations
    // ========================================================================

    #[test]
    fn test_scalar_relations() {
        assert_eq!(Type::Int.is_super_type_of(&Type::ConstantInt(3)), Yes);
        assert_eq!(Type::ConstantInt(3).is_super_type_of(&Type::Int), Maybe);
        assert_eq!(Type::ConstantInt(3).is_super_type_of(&Type::ConstantInt(4)), No);
        assert_eq!(Type::String.is_super_type_of(&Type::Int), No);
        assert_eq!(Type::Mixed.is_super_type_of(&Type::Error), Yes);
        assert_eq!(Type::Int.is_super_type_of(&Type::Mixed), Maybe);
        assert_eq!(Type::Int.is_super_type_of(&Type::Never), Yes);
    }

    #[test]
    fn test_union_relations() {
        let string_or_int = union(vec![Type::String, Type::Int]);
        assert_eq!(string_or_int.is_super_type_of(&Type::String), Yes);
        assert_eq!(string_or_int.is_super_type_of(&Type::Float), No);
        assert_eq!(Type::String.is_super_type_of(&string_or_int), Maybe);
        assert_eq!(
            Type::String.is_super_type_of(&union(vec![
                Type::constant_string("a"),
                Type::constant_string("b")
            ])),
            Yes
        );
    }

    #[test]
    fn test_array_relations() {
        let mixed_array = Type::array(Type::Mixed, Type::Mixed);
        assert_eq!(mixed_array.is_super_type_of(&Type::array(Type::Int, Type::String)), Yes);
        assert_eq!(mixed_array.is_super_type_of(&Type::empty_array()), Yes);
        assert_eq!(Type::array(Type::Int, Type::Int).is_super_type_of(&mixed_array), Maybe);
        assert_eq!(mixed_array.is_super_type_of(&Type::Int), No);
    }

    #[test]
    fn test_object_relations() {
        assert_eq!(Type::object("Foo").is_super_type_of(&Type::object("foo")), Yes);
        assert_eq!(Type::object("Foo").is_super_type_of(&Type::object("Bar")), No);
    }

    // ========================================================================
    // Coercions
    // ========================================================================

    #[test]
    fn test_to_number() {
        assert_eq!(Type::Null.to_number(), Type::ConstantInt(0));
        assert_eq!(Type::ConstantBool(true).to_number(), Type::ConstantInt(1));
        assert_eq!(Type::String.to_number(), Type::number());
        assert_eq!(Type::constant_string("12").to_number(), Type::ConstantInt(12));
        assert_eq!(Type::constant_string(" 1.5 ").to_number(), Type::ConstantFloat(1.5));
        assert_eq!(Type::constant_string("abc").to_number(), Type::Error);
        assert_eq!(Type::array(Type::Mixed, Type::Mixed).to_number(), Type::Error);
        assert_eq!(Type::object("Foo").to_number(), Type::Error);
        assert_eq!(union(vec![Type::Int, Type::object("Foo")]).to_number(), Type::Error);
    }

    #[test]
    fn test_to_string_type() {
        assert_eq!(Type::ConstantBool(true).to_string_type(), Type::constant_string("1"));
        assert_eq!(Type::Null.to_string_type(), Type::constant_string(""));
        assert_eq!(Type::ConstantInt(42).to_string_type(), Type::constant_string("42"));
        assert_eq!(Type::ConstantFloat(2.0).to_string_type(), Type::constant_string("2"));
        assert_eq!(Type::object("Foo").to_string_type(), Type::Error);
        assert_eq!(Type::stringable_object("Foo").to_string_type(), Type::String);
        assert_eq!(Type::empty_array().to_string_type(), Type::Error);
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("-7"), Some(Type::ConstantInt(-7)));
        assert_eq!(parse_numeric("+.5"), Some(Type::ConstantFloat(0.5)));
        assert_eq!(parse_numeric("1e3"), Some(Type::ConstantFloat(1000.0)));
        assert_eq!(parse_numeric("99999999999999999999"), Some(Type::ConstantFloat(1e20)));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("."), None);
        assert_eq!(parse_numeric("1e"), None);
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("12abc"), None);
    }

    // ========================================================================
    // Description
    // ========================================================================

    #[test]
    fn test_describe_constants() {
        assert_eq!(Type::ConstantInt(1).describe(VerbosityLevel::Value), "1");
        assert_eq!(Type::ConstantInt(1).describe(VerbosityLevel::TypeOnly), "int");
        assert_eq!(Type::constant_string("abc").describe(VerbosityLevel::Value), "'abc'");
        assert_eq!(Type::ConstantFloat(1.5).describe(VerbosityLevel::Value), "1.5");
        assert_eq!(Type::ConstantBool(false).describe(VerbosityLevel::Value), "false");
    }

    #[test]
    fn test_describe_arrays() {
        assert_eq!(Type::array(Type::Mixed, Type::Mixed).to_string(), "array");
        assert_eq!(Type::empty_array().to_string(), "array()");
        assert_eq!(Type::array(Type::Mixed, Type::Int).to_string(), "array<int>");
        assert_eq!(Type::array(Type::Int, Type::String).to_string(), "array<int, string>");
        assert_eq!(
            Type::array(Type::Int, Type::String).describe(VerbosityLevel::TypeOnly),
            "array"
        );
    }

    #[test]
    fn test_describe_unions() {
        let ty = union(vec![Type::String, Type::array(Type::Mixed, Type::Mixed)]);
        assert_eq!(ty.to_string(), "string|array");
        let constants = union(vec![Type::constant_string("a"), Type::constant_string("b")]);
        assert_eq!(constants.describe(VerbosityLevel::Value), "'a'|'b'");
        assert_eq!(constants.describe(VerbosityLevel::TypeOnly), "string");
    }
}
