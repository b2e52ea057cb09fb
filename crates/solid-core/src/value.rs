//! Typed generic property values.
//!
//! [`Value`] is what a device interface hands back when a property is read by
//! name, and what a predicate atom carries as its expected value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A property value read from, or compared against, a device interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i32),
    UInt(u32),
    Int64(i64),
    UInt64(u64),
    Double(f64),
    String(String),
    StringList(Vec<String>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Int64(_) => "int64",
            Self::UInt64(_) => "uint64",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::StringList(_) => "string-list",
        }
    }

    pub fn is_integer(&self) -> bool {
        self.integer().is_some()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            Self::StringList(v) => Some(v),
            _ => None,
        }
    }

    /// Exact integer value for the integer kinds only.
    fn integer(&self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(i128::from(*v)),
            Self::UInt(v) => Some(i128::from(*v)),
            Self::Int64(v) => Some(i128::from(*v)),
            Self::UInt64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    /// Integer conversion used by mask comparisons.
    ///
    /// Integer kinds convert directly (`UInt64` keeps its bit pattern), `Bool`
    /// converts to 0 or 1, a `Double` only when finite and integral, and a
    /// `String` when it holds a decimal integer.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Bool(v) => Some(i64::from(*v)),
            Self::Int(v) => Some(i64::from(*v)),
            Self::UInt(v) => Some(i64::from(*v)),
            Self::Int64(v) => Some(*v),
            Self::UInt64(v) => Some(*v as i64),
            Self::Double(v) => {
                if v.is_finite() && v.fract() == 0.0 && v.abs() <= i64::MAX as f64 {
                    Some(*v as i64)
                } else {
                    None
                }
            }
            Self::String(s) => s.trim().parse().ok(),
            Self::StringList(_) => None,
        }
    }

    /// Type-aware equality used when matching devices.
    ///
    /// Integer kinds compare numerically with each other and with doubles. A
    /// string compares numerically with a number when it holds numeric text,
    /// so `'11.4'` equals `Double(11.4)`. Every other pairing requires the
    /// same kind.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::StringList(a), Self::StringList(b)) => a == b,
            (Self::String(text), number) | (number, Self::String(text)) => {
                numeric_text_equals(text, number)
            }
            (Self::Double(a), Self::Double(b)) => a == b,
            (Self::Double(d), other) | (other, Self::Double(d)) => match other.integer() {
                Some(i) => i as f64 == *d,
                None => false,
            },
            (a, b) => match (a.integer(), b.integer()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    /// Render as a predicate literal.
    pub fn to_literal(&self) -> String {
        self.to_string()
    }
}

fn numeric_text_equals(text: &str, number: &Value) -> bool {
    let text = text.trim();
    match number {
        Value::Double(d) => text.parse::<f64>().is_ok_and(|t| t == *d),
        _ => match number.integer() {
            Some(i) => match text.parse::<i128>() {
                Ok(t) => t == i,
                Err(_) => text.parse::<f64>().is_ok_and(|t| t == i as f64),
            },
            None => false,
        },
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in s.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("'")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Int64(v) => write!(f, "{}", v),
            Self::UInt64(v) => write!(f, "{}", v),
            Self::Double(v) => {
                let text = v.to_string();
                if v.is_finite() && !text.contains('.') {
                    write_quoted(f, &format!("{}.0", text))
                } else {
                    write_quoted(f, &text)
                }
            }
            Self::String(s) => write_quoted(f, s),
            Self::StringList(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, item)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::UInt(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Self::StringList(v)
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Self::StringList(v.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_kinds_compare_numerically() {
        assert!(Value::UInt(5).loosely_equals(&Value::Int(5)));
        assert!(Value::UInt64(7).loosely_equals(&Value::Int64(7)));
        assert!(!Value::Int(-1).loosely_equals(&Value::UInt64(u64::MAX)));
        assert!(Value::Int(3).loosely_equals(&Value::Double(3.0)));
        assert!(!Value::Double(3.5).loosely_equals(&Value::Int(3)));
    }

    #[test]
    fn test_mismatched_kinds_are_unequal() {
        assert!(!Value::String("one".into()).loosely_equals(&Value::Int(1)));
        assert!(!Value::Bool(true).loosely_equals(&Value::Int(1)));
        assert!(!Value::Bool(true).loosely_equals(&Value::String("true".into())));
        assert!(!Value::from(vec!["a"]).loosely_equals(&Value::from("a")));
    }

    #[test]
    fn test_numeric_text_compares_numerically() {
        assert!(Value::from("11.4").loosely_equals(&Value::Double(11.4)));
        assert!(Value::Double(12.0).loosely_equals(&Value::from("12.0")));
        assert!(Value::from(" 8 ").loosely_equals(&Value::Int(8)));
        assert!(Value::UInt64(u64::MAX).loosely_equals(&Value::from("18446744073709551615")));
        assert!(Value::from("3.0").loosely_equals(&Value::Int(3)));
        assert!(!Value::from("11.5").loosely_equals(&Value::Double(11.4)));
        assert!(!Value::from("ext4").loosely_equals(&Value::Double(4.0)));
        assert!(!Value::from("8").loosely_equals(&Value::from(vec!["8"])));
    }

    #[test]
    fn test_string_lists_compare_in_order() {
        let ab = Value::from(vec!["a", "b"]);
        assert!(ab.loosely_equals(&Value::from(vec!["a", "b"])));
        assert!(!ab.loosely_equals(&Value::from(vec!["b", "a"])));
    }

    #[test]
    fn test_to_i64() {
        assert_eq!(Value::Bool(true).to_i64(), Some(1));
        assert_eq!(Value::UInt(8).to_i64(), Some(8));
        assert_eq!(Value::String(" 24 ".into()).to_i64(), Some(24));
        assert_eq!(Value::String("Dvdr".into()).to_i64(), None);
        assert_eq!(Value::Double(4.0).to_i64(), Some(4));
        assert_eq!(Value::Double(4.5).to_i64(), None);
        assert_eq!(Value::from(vec!["1"]).to_i64(), None);
    }

    #[test]
    fn test_literal_rendering() {
        assert_eq!(Value::from("ext4").to_literal(), "'ext4'");
        assert_eq!(Value::Bool(false).to_literal(), "false");
        assert_eq!(Value::UInt64(42).to_literal(), "42");
        assert_eq!(Value::Int(-3).to_literal(), "-3");
        assert_eq!(Value::Double(2.0).to_literal(), "'2.0'");
        assert_eq!(Value::Double(0.25).to_literal(), "'0.25'");
        assert_eq!(Value::Double(f64::INFINITY).to_literal(), "'inf'");
        assert_eq!(Value::from(vec!["a", "b"]).to_literal(), "{'a', 'b'}");
        assert_eq!(Value::StringList(vec![]).to_literal(), "{}");
    }

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(Value::from("it's").to_literal(), r"'it\'s'");
        assert_eq!(Value::from(r"C:\").to_literal(), r"'C:\\'");
    }
}
