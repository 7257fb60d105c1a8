pub mod interpreter;
pub mod math;
pub mod memory;
pub mod output;
pub mod stack;
pub mod value;

pub use interpreter::Interpreter;
pub use memory::Memory;
pub use output::PrintHandler;
pub use value::Value;
