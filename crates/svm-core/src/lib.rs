//! SVM - Core Library
//!
//! A small stack-based bytecode interpreter. Programs are flat sequences of
//! [`Instruction`]s operating on a value stack and a fixed-size integer
//! [`Memory`]; `Print` is the only observable side effect.
//!
//! ```
//! use svm_core::{Instruction, Interpreter, Memory, OpCode, PrintHandler, VmConfig};
//!
//! let program = vec![
//!     Instruction::push(5),
//!     Instruction::push(6),
//!     Instruction::new(OpCode::Mul),
//!     Instruction::new(OpCode::Print),
//! ];
//!
//! let mut memory = Memory::default();
//! let mut vm = Interpreter::with_config(&mut memory, VmConfig::new(), PrintHandler::buffer());
//! vm.run(&program).unwrap();
//! assert_eq!(vm.output(), "30\n");
//! ```

pub mod error;
pub mod config;
pub mod bytecode;
pub mod vm;
pub mod loader;

// Re-export commonly used types
pub use error::{Fault, VmError, VmResult};
pub use config::{VmConfig, DEFAULT_MEMORY_SIZE};
pub use bytecode::{Instruction, OpCode};
pub use vm::{Interpreter, Memory, PrintHandler, Value};
pub use loader::{BytecodeLoader, BytecodeWriter};
