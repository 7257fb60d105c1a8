//! Bytecode Writer
//!
//! Serializes programs into the format read by [`super::BytecodeLoader`].

use crate::bytecode::instruction::Instruction;
use crate::error::{VmError, VmResult};
use crate::vm::value::Value;

use super::loader::{BYTECODE_MAGIC, TAG_BOOLEAN, TAG_INTEGER, TAG_NONE, TAG_TEXT, VERSION_MAJOR};

pub struct BytecodeWriter;

impl BytecodeWriter {
    pub fn encode(program: &[Instruction]) -> VmResult<Vec<u8>> {
        let mut buf = Vec::new();
        buf.extend(&BYTECODE_MAGIC.to_be_bytes());
        buf.push(VERSION_MAJOR);
        buf.push(0u8); // minor
        buf.push(0u8); // patch
        buf.push(0u8); // reserved
        buf.extend(&length_prefix("program", program.len())?);

        for instruction in program {
            buf.push(instruction.opcode as u8);
            match &instruction.operand {
                None => buf.push(TAG_NONE),
                Some(Value::Integer(n)) => {
                    buf.push(TAG_INTEGER);
                    buf.extend(&n.to_be_bytes());
                }
                Some(Value::Text(s)) => {
                    buf.push(TAG_TEXT);
                    buf.extend(&length_prefix("text operand", s.len())?);
                    buf.extend(s.as_bytes());
                }
                Some(Value::Boolean(b)) => {
                    buf.push(TAG_BOOLEAN);
                    buf.push(u8::from(*b));
                }
            }
        }
        Ok(buf)
    }
}

/// Big-endian u32 prefix, or `LengthOverflow` when `len` needs more bits.
fn length_prefix(what: &'static str, len: usize) -> VmResult<[u8; 4]> {
    u32::try_from(len)
        .map(u32::to_be_bytes)
        .map_err(|_| VmError::LengthOverflow { what, len })
}
