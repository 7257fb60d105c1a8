pub mod loader;
pub mod writer;

pub use loader::BytecodeLoader;
pub use writer::BytecodeWriter;
