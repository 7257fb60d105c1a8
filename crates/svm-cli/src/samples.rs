//! Bundled sample programs written by `svm generate`.

use clap::ValueEnum;
use svm_core::{Instruction, OpCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sample {
    /// 5*6 - (2+3), then 7/2 and -7 mod 3
    Arithmetic,
    /// Counts down from 5 using memory cell 0
    Countdown,
    /// Stores 42 in cell 3 and reads it back
    Memory,
    /// Truncated sqrt, log2 and sin
    Trig,
}

fn op(opcode: OpCode) -> Instruction {
    Instruction::new(opcode)
}

impl Sample {
    pub fn program(self) -> Vec<Instruction> {
        match self {
            Sample::Arithmetic => vec![
                Instruction::push(5),
                Instruction::push(6),
                op(OpCode::Mul),
                Instruction::push(2),
                Instruction::push(3),
                op(OpCode::Add),
                op(OpCode::Sub),
                op(OpCode::Print),
                Instruction::push(7),
                Instruction::push(2),
                op(OpCode::Div),
                op(OpCode::Print),
                Instruction::push(-7),
                Instruction::push(3),
                op(OpCode::Mod),
                op(OpCode::Print),
            ],
            Sample::Countdown => vec![
                Instruction::push(5),
                Instruction::store(0),
                // loop head at 2
                Instruction::load(0),
                Instruction::push(0),
                op(OpCode::GreaterThan),
                Instruction::jump_if_false(13),
                Instruction::load(0),
                op(OpCode::Print),
                Instruction::load(0),
                Instruction::push(1),
                op(OpCode::Sub),
                Instruction::store(0),
                Instruction::jump(2),
                Instruction::push("liftoff"),
                op(OpCode::Print),
            ],
            Sample::Memory => vec![
                Instruction::push(42),
                Instruction::store(3),
                Instruction::load(3),
                op(OpCode::Print),
            ],
            Sample::Trig => vec![
                Instruction::push(2),
                op(OpCode::Sqrt),
                op(OpCode::Print),
                Instruction::push(1024),
                op(OpCode::LogBaseTwo),
                op(OpCode::Print),
                Instruction::push(2),
                op(OpCode::Sin),
                op(OpCode::Print),
            ],
        }
    }
}
