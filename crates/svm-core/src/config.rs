//! SVM Configuration
//!
//! Runtime limits for the interpreter.
//! Configuration specifies constraints only; enforcement is handled by the VM.

/// Number of memory cells callers get unless they ask for something else.
pub const DEFAULT_MEMORY_SIZE: usize = 256;

/// VM Configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmConfig {
    /// Maximum stack depth
    pub max_stack_size: usize,

    /// Maximum number of instructions a single run may execute.
    /// `None` runs until the program counter leaves the program.
    pub step_limit: Option<u64>,
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            max_stack_size: 1024,
            step_limit: None,
        }
    }
}

impl VmConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_stack_size(mut self, max_stack_size: usize) -> Self {
        self.max_stack_size = max_stack_size;
        self
    }

    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }
}
