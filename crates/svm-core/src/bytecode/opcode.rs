//! Bytecode Opcode Definitions
//!
//! Defines the opcode set of the stack VM.
//! This file contains no execution semantics.
//! Opcode byte values are part of the serialized format and must not change.

use std::fmt;

/// Bytecode opcodes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    // Stack
    Push = 0x01,

    // Integer arithmetic
    Add = 0x10,
    Sub = 0x11,
    Mul = 0x12,
    Div = 0x13,
    Mod = 0x14,

    // Boolean logic. The "bitwise" family operates on booleans too.
    BitwiseAnd = 0x20,
    BitwiseOr  = 0x21,
    BitwiseXor = 0x22,
    LogicalAnd = 0x23,
    LogicalOr  = 0x24,

    // Comparison
    GreaterThan = 0x30,
    LessThan    = 0x31,

    // Transcendental (integer in, truncated integer out)
    LogBaseTwo = 0x40,
    LogBaseTen = 0x41,
    Log        = 0x42,
    Sqrt       = 0x43,
    Sin        = 0x44,
    Cos        = 0x45,
    Tan        = 0x46,

    // Memory
    Load  = 0x50,
    Store = 0x51,

    // Control flow
    Jump        = 0x60,
    JumpIfFalse = 0x61,
    JumpIfTrue  = 0x62,

    // Output
    Print = 0x70,
}

impl OpCode {
    /// Convert raw byte to opcode
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(OpCode::Push),

            0x10 => Some(OpCode::Add),
            0x11 => Some(OpCode::Sub),
            0x12 => Some(OpCode::Mul),
            0x13 => Some(OpCode::Div),
            0x14 => Some(OpCode::Mod),

            0x20 => Some(OpCode::BitwiseAnd),
            0x21 => Some(OpCode::BitwiseOr),
            0x22 => Some(OpCode::BitwiseXor),
            0x23 => Some(OpCode::LogicalAnd),
            0x24 => Some(OpCode::LogicalOr),

            0x30 => Some(OpCode::GreaterThan),
            0x31 => Some(OpCode::LessThan),

            0x40 => Some(OpCode::LogBaseTwo),
            0x41 => Some(OpCode::LogBaseTen),
            0x42 => Some(OpCode::Log),
            0x43 => Some(OpCode::Sqrt),
            0x44 => Some(OpCode::Sin),
            0x45 => Some(OpCode::Cos),
            0x46 => Some(OpCode::Tan),

            0x50 => Some(OpCode::Load),
            0x51 => Some(OpCode::Store),

            0x60 => Some(OpCode::Jump),
            0x61 => Some(OpCode::JumpIfFalse),
            0x62 => Some(OpCode::JumpIfTrue),

            0x70 => Some(OpCode::Print),

            _ => None,
        }
    }

    /// Lower-case assembly name, used by the disassembler and in trap messages.
    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Push => "push",
            OpCode::Add => "add",
            OpCode::Sub => "sub",
            OpCode::Mul => "mul",
            OpCode::Div => "div",
            OpCode::Mod => "mod",
            OpCode::BitwiseAnd => "band",
            OpCode::BitwiseOr => "bor",
            OpCode::BitwiseXor => "bxor",
            OpCode::LogicalAnd => "and",
            OpCode::LogicalOr => "or",
            OpCode::GreaterThan => "gt",
            OpCode::LessThan => "lt",
            OpCode::LogBaseTwo => "log2",
            OpCode::LogBaseTen => "log10",
            OpCode::Log => "ln",
            OpCode::Sqrt => "sqrt",
            OpCode::Sin => "sin",
            OpCode::Cos => "cos",
            OpCode::Tan => "tan",
            OpCode::Load => "load",
            OpCode::Store => "store",
            OpCode::Jump => "jmp",
            OpCode::JumpIfFalse => "jmpf",
            OpCode::JumpIfTrue => "jmpt",
            OpCode::Print => "print",
        }
    }

    /// Whether the instruction embeds an immediate operand.
    pub fn requires_operand(self) -> bool {
        matches!(
            self,
            OpCode::Push
                | OpCode::Load
                | OpCode::Store
                | OpCode::Jump
                | OpCode::JumpIfFalse
                | OpCode::JumpIfTrue
        )
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
