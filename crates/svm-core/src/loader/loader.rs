//! Bytecode Loader
//!
//! Decodes serialized programs.
//! This layer performs structural validation only: operand tags are not
//! checked against opcodes and jump targets are not resolved. Those are
//! execution-time faults.

use crate::bytecode::instruction::Instruction;
use crate::bytecode::opcode::OpCode;
use crate::error::{VmError, VmResult};
use crate::vm::value::Value;

/// Bytecode magic: "SVMB"
pub const BYTECODE_MAGIC: u32 = 0x5356_4D42;

/// Supported bytecode version
pub const VERSION_MAJOR: u8 = 1;

/// Header: magic, version triple, reserved byte, instruction count
pub const HEADER_SIZE: usize = 12;

pub const TAG_NONE: u8 = 0x00;
pub const TAG_INTEGER: u8 = 0x01;
pub const TAG_TEXT: u8 = 0x02;
pub const TAG_BOOLEAN: u8 = 0x03;

/// Bytecode loader
pub struct BytecodeLoader;

impl BytecodeLoader {
    /// Load a program from raw bytes
    pub fn load(bytes: &[u8]) -> VmResult<Vec<Instruction>> {
        if bytes.len() < HEADER_SIZE {
            return Err(VmError::BytecodeTooShort);
        }

        let mut cursor = 0;

        // Magic
        let magic = Self::read_u32(bytes, &mut cursor)?;
        if magic != BYTECODE_MAGIC {
            return Err(VmError::InvalidMagicNumber);
        }

        // Version
        let major = Self::read_u8(bytes, &mut cursor)?;
        let _minor = Self::read_u8(bytes, &mut cursor)?;
        let _patch = Self::read_u8(bytes, &mut cursor)?;

        if major != VERSION_MAJOR {
            return Err(VmError::InvalidBytecodeVersion(major));
        }

        // Reserved
        Self::read_u8(bytes, &mut cursor)?;

        let count = Self::read_u32(bytes, &mut cursor)? as usize;
        // every instruction takes at least two bytes
        if count > (bytes.len() - cursor) / 2 {
            return Err(VmError::BytecodeTooShort);
        }

        let mut program = Vec::with_capacity(count);
        for _ in 0..count {
            program.push(Self::read_instruction(bytes, &mut cursor)?);
        }

        if cursor != bytes.len() {
            return Err(VmError::TrailingBytes(bytes.len() - cursor));
        }

        Ok(program)
    }

    fn read_instruction(bytes: &[u8], cursor: &mut usize) -> VmResult<Instruction> {
        let byte = Self::read_u8(bytes, cursor)?;
        let opcode = OpCode::from_u8(byte).ok_or(VmError::InvalidOpcode(byte))?;
        let operand = Self::read_operand(bytes, cursor)?;
        Ok(Instruction { opcode, operand })
    }

    fn read_operand(bytes: &[u8], cursor: &mut usize) -> VmResult<Option<Value>> {
        let tag = Self::read_u8(bytes, cursor)?;

        match tag {
            TAG_NONE => Ok(None),
            TAG_INTEGER => {
                let n = Self::read_u32(bytes, cursor)? as i32;
                Ok(Some(Value::Integer(n)))
            }
            TAG_TEXT => {
                let len = Self::read_u32(bytes, cursor)? as usize;
                let raw = Self::read_slice(bytes, cursor, len)?;
                let s = std::str::from_utf8(raw).map_err(|_| VmError::InvalidUtf8)?;
                Ok(Some(Value::text(s)))
            }
            TAG_BOOLEAN => {
                let b = Self::read_u8(bytes, cursor)?;
                Ok(Some(Value::Boolean(b != 0)))
            }
            _ => Err(VmError::InvalidOperandTag(tag)),
        }
    }

    fn read_u8(bytes: &[u8], cursor: &mut usize) -> VmResult<u8> {
        let v = *bytes.get(*cursor).ok_or(VmError::BytecodeTooShort)?;
        *cursor += 1;
        Ok(v)
    }

    fn read_u32(bytes: &[u8], cursor: &mut usize) -> VmResult<u32> {
        let raw = Self::read_slice(bytes, cursor, 4)?;
        Ok(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    fn read_slice<'b>(bytes: &'b [u8], cursor: &mut usize, len: usize) -> VmResult<&'b [u8]> {
        let end = cursor.checked_add(len).ok_or(VmError::BytecodeTooShort)?;
        let slice = bytes.get(*cursor..end).ok_or(VmError::BytecodeTooShort)?;
        *cursor = end;
        Ok(slice)
    }
}
