use std::io::{self, Write};

use pretty_assertions::assert_eq;
use svm_core::{Fault, Instruction, Interpreter, Memory, OpCode, PrintHandler, VmConfig, VmError};

fn op(opcode: OpCode) -> Instruction {
    Instruction::new(opcode)
}

/// Run on fresh memory and return captured output, or the trap.
fn run(program: &[Instruction]) -> Result<String, VmError> {
    let mut memory = Memory::default();
    let mut vm = Interpreter::with_config(&mut memory, VmConfig::new(), PrintHandler::buffer());
    vm.run(program)?;
    Ok(vm.output().to_string())
}

fn run_with_output(program: &[Instruction]) -> (Result<(), VmError>, String) {
    let mut memory = Memory::default();
    let mut vm = Interpreter::with_config(&mut memory, VmConfig::new(), PrintHandler::buffer());
    let res = vm.run(program);
    (res, vm.output().to_string())
}

#[test]
fn division_truncates_toward_zero() {
    let program = |a: i32, b: i32| {
        vec![
            Instruction::push(a),
            Instruction::push(b),
            op(OpCode::Div),
            op(OpCode::Print),
        ]
    };
    assert_eq!(run(&program(7, 2)).unwrap(), "3\n");
    assert_eq!(run(&program(-7, 2)).unwrap(), "-3\n");
}

#[test]
fn mixed_arithmetic() {
    // 5*6 - (2+3)
    let program = vec![
        Instruction::push(5),
        Instruction::push(6),
        op(OpCode::Mul),
        Instruction::push(2),
        Instruction::push(3),
        op(OpCode::Add),
        op(OpCode::Sub),
        op(OpCode::Print),
    ];
    assert_eq!(run(&program).unwrap(), "25\n");
}

#[test]
fn logical_operators() {
    let program = vec![
        Instruction::push(true),
        Instruction::push(false),
        op(OpCode::LogicalAnd),
        op(OpCode::Print),
        Instruction::push(true),
        Instruction::push(false),
        op(OpCode::LogicalOr),
        op(OpCode::Print),
    ];
    assert_eq!(run(&program).unwrap(), "false\ntrue\n");
}

#[test]
fn store_load_round_trip() {
    let program = vec![
        Instruction::push(42),
        Instruction::store(3),
        Instruction::load(3),
        op(OpCode::Print),
    ];
    let mut memory = Memory::new(256);
    let mut vm = Interpreter::with_config(&mut memory, VmConfig::new(), PrintHandler::buffer());
    vm.run(&program).unwrap();
    assert_eq!(vm.output(), "42\n");
    assert_eq!(vm.memory().get(3), Some(42));
    drop(vm);
    assert_eq!(memory.get(3), Some(42));
}

#[test]
fn memory_is_caller_owned_across_interpreters() {
    let mut memory = Memory::from(vec![0, 10, 20, 30]);
    {
        let mut vm = Interpreter::with_config(&mut memory, VmConfig::new(), PrintHandler::Silent);
        vm.run(&[
            Instruction::load(1),
            Instruction::load(2),
            op(OpCode::Add),
            Instruction::store(0),
        ])
        .unwrap();
    }
    let mut vm = Interpreter::with_config(&mut memory, VmConfig::new(), PrintHandler::buffer());
    vm.run(&[Instruction::load(0), op(OpCode::Print)]).unwrap();
    assert_eq!(vm.output(), "30\n");
}

#[test]
fn division_by_zero_traps_without_output() {
    let program = vec![
        Instruction::push(1),
        Instruction::push(0),
        op(OpCode::Div),
        op(OpCode::Print),
    ];
    let (res, out) = run_with_output(&program);
    let err = res.unwrap_err();
    assert_eq!(err.fault(), Some(&Fault::DivisionByZero));
    assert_eq!(out, "");
}

#[test]
fn add_on_empty_stack_underflows() {
    let err = run(&[op(OpCode::Add)]).unwrap_err();
    match err {
        VmError::Trap { pc, opcode, fault } => {
            assert_eq!(pc, 0);
            assert_eq!(opcode, OpCode::Add);
            assert_eq!(fault, Fault::StackUnderflow);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn add_with_one_operand_underflows() {
    let err = run(&[Instruction::push(1), op(OpCode::Add)]).unwrap_err();
    assert_eq!(err.fault(), Some(&Fault::StackUnderflow));
}

#[test]
fn add_on_text_is_a_type_mismatch() {
    let err = run(&[Instruction::push(1), Instruction::push("one"), op(OpCode::Add)]).unwrap_err();
    assert_eq!(
        err.fault(),
        Some(&Fault::TypeMismatch {
            expected: "Integer",
            found: "Text",
        })
    );
}

#[test]
fn jump_if_false_skips_print() {
    let program = |cond: bool| {
        vec![
            Instruction::push(cond),
            Instruction::jump_if_false(4),
            Instruction::push("reached"),
            op(OpCode::Print),
        ]
    };
    assert_eq!(run(&program(false)).unwrap(), "");
    assert_eq!(run(&program(true)).unwrap(), "reached\n");
}

#[test]
fn jump_if_true_mirrors_jump_if_false() {
    let program = |cond: bool| {
        vec![
            Instruction::push(cond),
            Instruction::jump_if_true(4),
            Instruction::push("reached"),
            op(OpCode::Print),
        ]
    };
    assert_eq!(run(&program(true)).unwrap(), "");
    assert_eq!(run(&program(false)).unwrap(), "reached\n");
}

#[test]
fn conditional_jump_on_integer_is_a_type_mismatch() {
    let err = run(&[Instruction::push(1), Instruction::jump_if_false(0)]).unwrap_err();
    match err {
        VmError::Trap { pc, opcode, fault } => {
            assert_eq!(pc, 1);
            assert_eq!(opcode, OpCode::JumpIfFalse);
            assert_eq!(
                fault,
                Fault::TypeMismatch {
                    expected: "Boolean",
                    found: "Integer",
                }
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let err = run(&[Instruction::push("yes"), Instruction::jump_if_true(0)]).unwrap_err();
    assert_eq!(
        err.fault(),
        Some(&Fault::TypeMismatch {
            expected: "Boolean",
            found: "Text",
        })
    );
}

#[test]
fn sqrt_truncates() {
    let program = vec![Instruction::push(2), op(OpCode::Sqrt), op(OpCode::Print)];
    assert_eq!(run(&program).unwrap(), "1\n");
}

#[test]
fn transcendentals_print_integers() {
    let program = vec![
        Instruction::push(8),
        op(OpCode::LogBaseTwo),
        op(OpCode::Print),
        Instruction::push(999),
        op(OpCode::LogBaseTen),
        op(OpCode::Print),
        Instruction::push(100),
        op(OpCode::Log),
        op(OpCode::Print),
        Instruction::push(0),
        op(OpCode::Cos),
        op(OpCode::Print),
    ];
    // ln(100) = 4.605..
    assert_eq!(run(&program).unwrap(), "3\n2\n4\n1\n");
}

#[test]
fn countdown_loop() {
    // mem[0] = 3; while mem[0] > 0 { print mem[0]; mem[0] -= 1 }
    let program = vec![
        Instruction::push(3),
        Instruction::store(0),
        Instruction::load(0), // 2
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
    ];
    assert_eq!(run(&program).unwrap(), "3\n2\n1\n");
}

#[test]
fn negative_memory_index_traps() {
    let err = run(&[Instruction::load(-1)]).unwrap_err();
    assert_eq!(
        err.fault(),
        Some(&Fault::OutOfBoundsMemoryAccess { index: -1, size: 256 })
    );
}

#[test]
fn print_renders_each_tag() {
    let program = vec![
        Instruction::push(-12),
        op(OpCode::Print),
        Instruction::push(true),
        op(OpCode::Print),
        Instruction::push("raw text"),
        op(OpCode::Print),
    ];
    assert_eq!(run(&program).unwrap(), "-12\ntrue\nraw text\n");
}

#[test]
fn output_before_a_trap_is_kept() {
    let program = vec![
        Instruction::push("before"),
        op(OpCode::Print),
        op(OpCode::Print),
    ];
    let (res, out) = run_with_output(&program);
    assert_eq!(res.unwrap_err().fault(), Some(&Fault::StackUnderflow));
    assert_eq!(out, "before\n");
}

#[test]
fn empty_program_succeeds() {
    assert_eq!(run(&[]).unwrap(), "");
}

/// Host sink whose reader has gone away.
struct HungUpSink;

impl Write for HungUpSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn print_to_closed_sink_is_a_trap() {
    let mut memory = Memory::default();
    let mut vm = Interpreter::with_config(&mut memory, VmConfig::new(), PrintHandler::writer(HungUpSink));
    let err = vm
        .run(&[Instruction::push("lost"), op(OpCode::Print)])
        .unwrap_err();
    assert_eq!(
        err.fault(),
        Some(&Fault::OutputFailed {
            kind: io::ErrorKind::BrokenPipe,
        })
    );
    assert_eq!(err.to_string(), "trap at pc 1 (print): print failed: broken pipe");
}
