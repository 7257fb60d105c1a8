//! SVM Error Types
//!
//! Two layers: a [`Fault`] is what went wrong inside a single instruction,
//! a [`VmError`] is what the caller of the loader or the interpreter sees.
//! Execution faults always reach the caller wrapped in [`VmError::Trap`],
//! tagged with the program counter and opcode of the failing instruction.

use std::io;

use crate::bytecode::opcode::OpCode;

/// Fault raised while executing one instruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("stack underflow")]
    StackUnderflow,

    #[error("stack overflow (limit {limit})")]
    StackOverflow { limit: usize },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("memory access out of bounds: index {index}, size {size}")]
    OutOfBoundsMemoryAccess { index: i64, size: usize },

    #[error("invalid jump target {target} (program length {len})")]
    InvalidJumpTarget { target: i64, len: usize },

    #[error("missing operand")]
    MissingOperand,

    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },

    #[error("print failed: {kind}")]
    OutputFailed { kind: io::ErrorKind },
}

/// Errors surfaced by the loader and the interpreter.
#[derive(Debug, thiserror::Error)]
pub enum VmError {
    // Bytecode errors
    #[error("invalid bytecode magic number")]
    InvalidMagicNumber,

    #[error("incompatible bytecode version {0}")]
    InvalidBytecodeVersion(u8),

    #[error("invalid opcode: 0x{0:02X}")]
    InvalidOpcode(u8),

    #[error("invalid operand tag: 0x{0:02X}")]
    InvalidOperandTag(u8),

    #[error("invalid utf-8 in text operand")]
    InvalidUtf8,

    #[error("bytecode is too short")]
    BytecodeTooShort,

    #[error("{0} trailing bytes after last instruction")]
    TrailingBytes(usize),

    #[error("{what} length {len} does not fit in a u32 length prefix")]
    LengthOverflow { what: &'static str, len: usize },

    // Execution
    #[error("trap at pc {pc} ({opcode}): {fault}")]
    Trap {
        pc: usize,
        opcode: OpCode,
        #[source]
        fault: Fault,
    },
}

impl VmError {
    /// The execution fault behind a trap, if this is one.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            VmError::Trap { fault, .. } => Some(fault),
            _ => None,
        }
    }
}

pub type VmResult<T> = Result<T, VmError>;
