//! SVM - CLI
//!
//! Runs serialized stack VM programs, writes bundled samples, and
//! disassembles program files.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use svm_core::{
    BytecodeLoader, BytecodeWriter, Instruction, Interpreter, Memory, PrintHandler, VmConfig,
    DEFAULT_MEMORY_SIZE,
};

mod samples;

use samples::Sample;

#[derive(Parser)]
#[command(name = "svm", version, about = "Stack VM: run, generate and inspect bytecode")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a bytecode file
    Run {
        /// Path to the bytecode file
        file: PathBuf,
        /// Number of integer memory cells
        #[arg(long, env = "SVM_MEMORY_SIZE", default_value_t = DEFAULT_MEMORY_SIZE)]
        memory_size: usize,
        /// Maximum stack depth
        #[arg(long, env = "SVM_MAX_STACK")]
        max_stack: Option<usize>,
        /// Abort after this many executed instructions
        #[arg(long, env = "SVM_STEP_LIMIT")]
        step_limit: Option<u64>,
        /// Print non-zero memory cells to stderr after the run
        #[arg(long)]
        dump_memory: bool,
    },
    /// Write a bundled sample program
    Generate {
        /// Output path
        path: PathBuf,
        #[arg(long, value_enum, default_value_t = Sample::Arithmetic)]
        sample: Sample,
    },
    /// Print a bytecode file as one instruction per line
    Disasm {
        /// Path to the bytecode file
        file: PathBuf,
    },
}

/// Logging goes to stderr so program output on stdout stays clean.
/// Enable with `RUST_LOG=svm_core=debug` (or `trace` for every dispatch).
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            file,
            memory_size,
            max_stack,
            step_limit,
            dump_memory,
        } => {
            let mut config = VmConfig::new();
            if let Some(max) = max_stack {
                config = config.with_max_stack_size(max);
            }
            if let Some(limit) = step_limit {
                config = config.with_step_limit(limit);
            }
            run(&file, config, memory_size, dump_memory)
        }
        Commands::Generate { path, sample } => generate(&path, sample),
        Commands::Disasm { file } => disasm(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn read_program(path: &Path) -> Result<Vec<Instruction>> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    BytecodeLoader::load(&bytes).with_context(|| format!("invalid bytecode in {}", path.display()))
}

fn run(path: &Path, config: VmConfig, memory_size: usize, dump_memory: bool) -> Result<()> {
    let program = read_program(path)?;
    info!(instructions = program.len(), memory_size, "loaded program");

    let mut memory = Memory::new(memory_size);
    let mut vm = Interpreter::with_config(&mut memory, config, PrintHandler::Stdout);
    vm.run(&program).context("runtime error")?;
    info!(steps = vm.steps(), "program finished");
    drop(vm);

    if dump_memory {
        for (index, cell) in memory.as_slice().iter().enumerate() {
            if *cell != 0 {
                eprintln!("mem[{index}] = {cell}");
            }
        }
    }
    Ok(())
}

fn generate(path: &Path, sample: Sample) -> Result<()> {
    let bytes = BytecodeWriter::encode(&sample.program()).context("failed to encode sample")?;
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    writeln!(io::stdout().lock(), "wrote {:?} sample to {}", sample, path.display())?;
    Ok(())
}

fn disasm(path: &Path) -> Result<()> {
    let program = read_program(path)?;
    let mut out = io::stdout().lock();
    for (i, ins) in program.iter().enumerate() {
        write_listing_line(&mut out, i, ins)?;
    }
    Ok(())
}

/// One `{:04}: op` line. The loader accepts operand-less Push/Load/Store/Jump*,
/// so those are marked here rather than left to trap at run time.
fn write_listing_line(out: &mut impl Write, index: usize, ins: &Instruction) -> io::Result<()> {
    if ins.opcode.requires_operand() && ins.operand.is_none() {
        writeln!(out, "{index:04}: {ins}  ; missing operand")
    } else {
        writeln!(out, "{index:04}: {ins}")
    }
}
