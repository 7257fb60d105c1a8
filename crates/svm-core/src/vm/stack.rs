//! VM Stack Implementation
//!
//! Stack data structure for VM execution.
//! No execution semantics beyond the tag checks of the typed pops.

use crate::error::Fault;
use super::value::Value;

/// VM execution stack
#[derive(Debug)]
pub struct Stack {
    values: Vec<Value>,
    max_size: usize,
}

impl Stack {
    /// Create new stack with maximum size
    pub fn new(max_size: usize) -> Self {
        Stack {
            values: Vec::new(),
            max_size,
        }
    }

    /// Push value onto stack
    pub fn push(&mut self, value: Value) -> Result<(), Fault> {
        if self.values.len() >= self.max_size {
            return Err(Fault::StackOverflow { limit: self.max_size });
        }
        self.values.push(value);
        Ok(())
    }

    /// Pop value from stack
    pub fn pop(&mut self) -> Result<Value, Fault> {
        self.values.pop().ok_or(Fault::StackUnderflow)
    }

    pub fn pop_integer(&mut self) -> Result<i32, Fault> {
        match self.pop()? {
            Value::Integer(n) => Ok(n),
            other => Err(Fault::TypeMismatch {
                expected: "Integer",
                found: other.type_name(),
            }),
        }
    }

    pub fn pop_boolean(&mut self) -> Result<bool, Fault> {
        match self.pop()? {
            Value::Boolean(b) => Ok(b),
            other => Err(Fault::TypeMismatch {
                expected: "Boolean",
                found: other.type_name(),
            }),
        }
    }

    /// Get current stack size
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Check if stack is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}
