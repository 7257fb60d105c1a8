//! Print handlers
//!
//! `Print` is the VM's only observable side effect. Where the line goes is
//! chosen by the embedder:
//! - `Stdout`: one line per `Print` on standard output (default)
//! - `Buffer`: captured in memory for tests and embedders
//! - `Writer`: any `io::Write` sink supplied by the host
//! - `Silent`: discarded

use std::fmt;
use std::io::{self, Write};

/// Destination of `Print` output, enum-dispatched.
#[derive(Default)]
pub enum PrintHandler {
    #[default]
    Stdout,
    Buffer(String),
    Writer(Box<dyn Write + Send>),
    Silent,
}

impl PrintHandler {
    pub fn buffer() -> Self {
        PrintHandler::Buffer(String::new())
    }

    pub fn writer(sink: impl Write + Send + 'static) -> Self {
        PrintHandler::Writer(Box::new(sink))
    }

    /// Emit one line of output.
    pub fn println(&mut self, line: &str) -> io::Result<()> {
        match self {
            PrintHandler::Stdout => writeln!(io::stdout().lock(), "{line}"),
            PrintHandler::Buffer(buf) => {
                buf.push_str(line);
                buf.push('\n');
                Ok(())
            }
            PrintHandler::Writer(sink) => writeln!(sink, "{line}"),
            PrintHandler::Silent => Ok(()),
        }
    }

    /// Captured output. Empty for handlers that don't capture.
    pub fn output(&self) -> &str {
        match self {
            PrintHandler::Buffer(buf) => buf,
            PrintHandler::Stdout | PrintHandler::Writer(_) | PrintHandler::Silent => "",
        }
    }
}

impl fmt::Debug for PrintHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintHandler::Stdout => f.write_str("Stdout"),
            PrintHandler::Buffer(buf) => f.debug_tuple("Buffer").field(buf).finish(),
            PrintHandler::Writer(_) => f.write_str("Writer(..)"),
            PrintHandler::Silent => f.write_str("Silent"),
        }
    }
}
