//! Interpreter Core
//!
//! Fetch, advance, execute: the program counter moves past an instruction
//! before its effect runs, and a run ends when the counter reaches the end
//! of the program. There is no halt opcode and no call stack.

use tracing::{debug, trace, warn};

use crate::bytecode::instruction::Instruction;
use crate::bytecode::opcode::OpCode;
use crate::config::VmConfig;
use crate::error::{Fault, VmError, VmResult};

use super::math;
use super::memory::Memory;
use super::output::PrintHandler;
use super::stack::Stack;
use super::value::Value;

/// Stack interpreter bound to caller-owned memory.
///
/// The stack and memory persist across [`Interpreter::run`] calls; only the
/// program counter is reset.
#[derive(Debug)]
pub struct Interpreter<'m> {
    config: VmConfig,
    stack: Stack,
    memory: &'m mut Memory,
    output: PrintHandler,
    pc: usize,
    steps: u64,
}

impl<'m> Interpreter<'m> {
    /// Interpreter with default limits, printing to stdout.
    pub fn new(memory: &'m mut Memory) -> Self {
        Self::with_config(memory, VmConfig::default(), PrintHandler::default())
    }

    pub fn with_config(memory: &'m mut Memory, config: VmConfig, output: PrintHandler) -> Self {
        Interpreter {
            stack: Stack::new(config.max_stack_size),
            memory,
            output,
            pc: 0,
            steps: 0,
            config,
        }
    }

    /// Execute `program` from its first instruction until the program
    /// counter runs off the end, or until the first trap.
    pub fn run(&mut self, program: &[Instruction]) -> VmResult<()> {
        self.pc = 0;
        self.steps = 0;
        debug!(instructions = program.len(), stack = self.stack.size(), "run start");

        while let Some(instruction) = program.get(self.pc) {
            let pc = self.pc;
            self.pc += 1;
            if let Err(fault) = self.step(pc, instruction, program.len()) {
                warn!(pc, opcode = %instruction.opcode, %fault, "trap");
                return Err(VmError::Trap {
                    pc,
                    opcode: instruction.opcode,
                    fault,
                });
            }
        }

        debug!(steps = self.steps, stack = self.stack.size(), "run complete");
        Ok(())
    }

    /// Values left on the stack, bottom first.
    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }

    pub fn memory(&self) -> &Memory {
        &*self.memory
    }

    /// Index of the next instruction to fetch.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Instructions executed by the latest run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Output captured by a buffering print handler.
    pub fn output(&self) -> &str {
        self.output.output()
    }

    /// Execute a single instruction
    fn step(&mut self, pc: usize, instruction: &Instruction, len: usize) -> Result<(), Fault> {
        if let Some(limit) = self.config.step_limit {
            if self.steps >= limit {
                return Err(Fault::StepLimitExceeded { limit });
            }
        }
        self.steps += 1;
        trace!(pc, %instruction, depth = self.stack.size(), "dispatch");

        let op = instruction.opcode;
        match op {
            OpCode::Push => {
                let value = instruction.operand.clone().ok_or(Fault::MissingOperand)?;
                self.stack.push(value)
            }

            OpCode::Add | OpCode::Sub | OpCode::Mul | OpCode::Div | OpCode::Mod => {
                let b = self.stack.pop_integer()?;
                let a = self.stack.pop_integer()?;
                let r = match op {
                    OpCode::Add => a.wrapping_add(b),
                    OpCode::Sub => a.wrapping_sub(b),
                    OpCode::Mul => a.wrapping_mul(b),
                    OpCode::Div => math::div(a, b)?,
                    _ => math::modulo(a, b)?,
                };
                self.stack.push(Value::Integer(r))
            }

            OpCode::BitwiseAnd
            | OpCode::BitwiseOr
            | OpCode::BitwiseXor
            | OpCode::LogicalAnd
            | OpCode::LogicalOr => {
                let b = self.stack.pop_boolean()?;
                let a = self.stack.pop_boolean()?;
                let r = match op {
                    OpCode::BitwiseAnd | OpCode::LogicalAnd => a && b,
                    OpCode::BitwiseOr | OpCode::LogicalOr => a || b,
                    _ => a ^ b,
                };
                self.stack.push(Value::Boolean(r))
            }

            OpCode::GreaterThan | OpCode::LessThan => {
                let b = self.stack.pop_integer()?;
                let a = self.stack.pop_integer()?;
                let r = if op == OpCode::GreaterThan { a > b } else { a < b };
                self.stack.push(Value::Boolean(r))
            }

            OpCode::LogBaseTwo => self.float_unary(f64::log2),
            OpCode::LogBaseTen => self.float_unary(f64::log10),
            OpCode::Log => self.float_unary(f64::ln),
            OpCode::Sqrt => self.float_unary(f64::sqrt),
            OpCode::Sin => self.float_unary(f64::sin),
            OpCode::Cos => self.float_unary(f64::cos),
            OpCode::Tan => self.float_unary(f64::tan),

            OpCode::Load => {
                let index = integer_operand(instruction)?;
                let value = self.memory.load(index)?;
                self.stack.push(Value::Integer(value))
            }
            OpCode::Store => {
                let index = integer_operand(instruction)?;
                let value = self.stack.pop_integer()?;
                self.memory.store(index, value)
            }

            OpCode::Jump => {
                let target = integer_operand(instruction)?;
                self.jump_to(target, len)
            }
            OpCode::JumpIfFalse | OpCode::JumpIfTrue => {
                let target = integer_operand(instruction)?;
                let cond = self.stack.pop_boolean()?;
                if cond == (op == OpCode::JumpIfTrue) {
                    self.jump_to(target, len)
                } else {
                    Ok(())
                }
            }

            OpCode::Print => {
                let value = self.stack.pop()?;
                self.output
                    .println(&value.to_string())
                    .map_err(|e| Fault::OutputFailed { kind: e.kind() })
            }
        }
    }

    fn float_unary(&mut self, f: fn(f64) -> f64) -> Result<(), Fault> {
        let v = self.stack.pop_integer()?;
        self.stack.push(Value::Integer(math::via_float(v, f)))
    }

    /// Absolute jump. `len` itself is a valid target and halts the run.
    fn jump_to(&mut self, target: i32, len: usize) -> Result<(), Fault> {
        let pc = usize::try_from(target)
            .ok()
            .filter(|&pc| pc <= len)
            .ok_or(Fault::InvalidJumpTarget {
                target: i64::from(target),
                len,
            })?;
        self.pc = pc;
        Ok(())
    }
}

fn integer_operand(instruction: &Instruction) -> Result<i32, Fault> {
    match &instruction.operand {
        Some(Value::Integer(n)) => Ok(*n),
        Some(other) => Err(Fault::TypeMismatch {
            expected: "Integer",
            found: other.type_name(),
        }),
        None => Err(Fault::MissingOperand),
    }
}
