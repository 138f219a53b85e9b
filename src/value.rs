use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Values carried by node ports: user-entered inputs and calculator outputs.
///
/// Serialized untagged so workflow files hold plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Structured results (arrays, objects) returned by a calculator.
    Json(serde_json::Value),
}

/// Input set handed to a calculator, keyed by input port name.
pub type Inputs = AHashMap<String, Value>;

/// Output set returned by a calculator, keyed by output port name.
pub type Outputs = AHashMap<String, Value>;

impl Value {
    /// Whether the value counts as "defined and non-empty" for required inputs.
    ///
    /// `0` and `false` are present; `Null`, blank text and NaN are not.
    pub fn is_present(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(_) => true,
            Value::Number(n) => !n.is_nan(),
            Value::Text(s) => !s.trim().is_empty(),
            Value::Json(v) => !v.is_null(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Json(v) => v.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Json(v) => v.as_str(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Json(v) => v.as_bool(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{}", s),
            Value::Json(v) => write!(f, "{}", v),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

