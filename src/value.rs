//! Dynamic values flowing between declarations, the parser and handlers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric kind used for coercion of parsed strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericType {
    /// Whole numbers (`i64`).
    Int,
    /// Floating point numbers (`f64`).
    Float,
}

impl NumericType {
    /// Returns the declaration keyword for this type marker.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
        }
    }
}

/// A default value, a parsed argument or a handler result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Absent value.
    #[default]
    None,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
    /// The bare type `int` or `float`, not an instance of it.
    Type(NumericType),
}

impl Value {
    /// Returns true for the absent value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns the boolean if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an Int value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the number as f64 if this is an Int or Float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string if this is a Str value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric kind of an instance (not of a type marker).
    pub fn numeric_type(&self) -> Option<NumericType> {
        match self {
            Value::Int(_) => Some(NumericType::Int),
            Value::Float(_) => Some(NumericType::Float),
            _ => None,
        }
    }

    /// Returns the type marker if this value is a bare type.
    pub fn type_marker(&self) -> Option<NumericType> {
        match self {
            Value::Type(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Type(t) => write!(f, "{}", t.keyword()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<NumericType> for Value {
    fn from(t: NumericType) -> Self {
        Value::Type(t)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::None)
    }
}
