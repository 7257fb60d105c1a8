//! Runtime Value Representation
//!
//! Defines the three value kinds the VM knows about.
//! Every stack slot and every instruction operand holds exactly one of them.

use std::fmt;
use std::sync::Arc;

/// Runtime value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// 32-bit signed integer
    Integer(i32),

    /// Immutable text
    Text(Arc<str>),

    /// Boolean value
    Boolean(bool),
}

impl Value {
    /// Tag name used in type mismatch faults.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Text(_) => "Text",
            Value::Boolean(_) => "Boolean",
        }
    }

    pub fn text(s: &str) -> Self {
        Value::Text(Arc::from(s))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(Arc::from(s))
    }
}

/// Print rendering: decimal integers, `true`/`false`, raw text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}
