//! Bytecode Instruction Representation
//!
//! An instruction is an opcode plus an optional immediate operand.
//! Construction does not check that the operand fits the opcode; that is
//! deferred to execution.

use std::fmt;

use super::opcode::OpCode;
use crate::vm::value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: OpCode,
    pub operand: Option<Value>,
}

impl Instruction {
    /// Create an instruction with no operand
    pub fn new(opcode: OpCode) -> Self {
        Instruction {
            opcode,
            operand: None,
        }
    }

    /// Create an instruction with an immediate operand
    pub fn with_operand(opcode: OpCode, operand: impl Into<Value>) -> Self {
        Instruction {
            opcode,
            operand: Some(operand.into()),
        }
    }

    pub fn push(value: impl Into<Value>) -> Self {
        Self::with_operand(OpCode::Push, value)
    }

    pub fn load(index: i32) -> Self {
        Self::with_operand(OpCode::Load, index)
    }

    pub fn store(index: i32) -> Self {
        Self::with_operand(OpCode::Store, index)
    }

    pub fn jump(target: i32) -> Self {
        Self::with_operand(OpCode::Jump, target)
    }

    pub fn jump_if_false(target: i32) -> Self {
        Self::with_operand(OpCode::JumpIfFalse, target)
    }

    pub fn jump_if_true(target: i32) -> Self {
        Self::with_operand(OpCode::JumpIfTrue, target)
    }
}

impl From<OpCode> for Instruction {
    fn from(opcode: OpCode) -> Self {
        Instruction::new(opcode)
    }
}

/// Assembly-style rendering; text operands are quoted.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            None => write!(f, "{}", self.opcode),
            Some(Value::Text(s)) => write!(f, "{} {:?}", self.opcode, s),
            Some(v) => write!(f, "{} {}", self.opcode, v),
        }
    }
}
