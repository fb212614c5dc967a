//! End-to-end tests for AVM program execution
//!
//! Drives the public machine API the way an embedder would: full programs
//! in, dump/print output and stack state observed.

use std::io::Write;

use avm::machine::{Machine, OperandKind};
use avm::Operand;

fn run_program(source: &str) -> (avm::AvmResult<()>, String) {
    let mut machine = Machine::new();
    let mut out = Vec::new();
    let result = machine.run_source_with_output(source, false, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_arithmetic_program() {
    let (result, out) = run_program("push int32(42)\npush int32(33)\nadd\ndump\nexit");
    assert!(result.is_ok());
    assert_eq!(out, "75\n");
}

#[test]
fn test_all_binary_operations() {
    let (result, out) = run_program(
        "push int32(10)\npush int32(3)\nmod\n\
         push int32(10)\npush int32(3)\ndiv\n\
         push int32(10)\npush int32(3)\nmul\n\
         push int32(10)\npush int32(3)\nsub\n\
         push int32(10)\npush int32(3)\nadd\n\
         dump\nexit",
    );
    assert!(result.is_ok());
    // most recent first: add, sub, mul, div, mod
    assert_eq!(out, "13\n7\n30\n3\n1\n");
}

#[test]
fn test_promotion_across_kinds() {
    let (result, out) = run_program("push int32(42)\npush float(33.0)\nadd\ndump\nexit");
    assert!(result.is_ok());
    assert_eq!(out, "75\n");

    let (result, out) = run_program("push int8(2)\npush double(1.5)\nmul\ndump\nexit");
    assert!(result.is_ok());
    assert_eq!(out, "3\n");
}

#[test]
fn test_dump_order_and_canonical_forms() {
    let source = "push int8(-128)\npush float(3.14)\npush double(-2.5)\ndump\nexit";
    let (result, out) = run_program(source);
    assert!(result.is_ok());
    assert_eq!(out, "-2.5\n3.14\n-128\n");
}

#[test]
fn test_print_spells_a_word() {
    let source = "push int8(73)\nprint\npop\npush int8(72)\nprint\nexit";
    let (result, out) = run_program(source);
    assert!(result.is_ok());
    // raw characters, no separators
    assert_eq!(out, "IH");
}

#[test]
fn test_assert_program() {
    let source = "push int32(42)\npush int32(33)\nadd\nassert int32(75)\nexit";
    let (result, _) = run_program(source);
    assert!(result.is_ok());
}

#[test]
fn test_comments_and_blank_lines() {
    let source = "; compute a sum\n\npush int32(1)\npush int32(2) ; operands\nadd\n\nassert int32(3)\nexit\n";
    let (result, _) = run_program(source);
    assert!(result.is_ok());
}

#[test]
fn test_both_value_syntaxes() {
    let source = "push int32(42)\npush int32 42\nassert int32 42\nsub\nassert int32(0)\nexit";
    let (result, _) = run_program(source);
    assert!(result.is_ok());
}

#[test]
fn test_exit_stops_execution_immediately() {
    let (result, out) = run_program("push int8(1)\ndump\nexit\ndump\ndump");
    assert!(result.is_ok());
    assert_eq!(out, "1\n");
}

#[test]
fn test_stack_is_empty_after_every_run() {
    let mut machine = Machine::new();
    let mut out = Vec::new();

    assert!(machine
        .run_source_with_output("push int32(1)\npush int32(2)\nexit", false, &mut out)
        .is_ok());
    assert_eq!(machine.stack_size(), 0);

    assert!(machine
        .run_source_with_output("pop\nexit", false, &mut out)
        .is_err());
    assert_eq!(machine.stack_size(), 0);
}

#[test]
fn test_interactive_marker_ends_program() {
    let mut machine = Machine::new();
    let mut out = Vec::new();
    let result = machine.run_source_with_output(
        "push int8(42)\ndump\nexit\n;;\nthis text is never lexed",
        true,
        &mut out,
    );
    assert!(result.is_ok());
    assert_eq!(String::from_utf8(out).unwrap(), "42\n");
}

#[test]
fn test_run_from_reader() {
    let mut machine = Machine::new();
    let source: &[u8] = b"push int16(500)\nassert int16(500)\nexit\n";
    assert!(machine.run(source, false).is_ok());
}

#[test]
fn test_run_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "push int32(7)\npush int32(6)\nmul\nassert int32(42)\nexit\n").unwrap();

    let mut machine = Machine::new();
    assert!(machine.run_file(file.path()).is_ok());
}

#[test]
fn test_operand_round_trip_through_program_text() {
    // what dump prints re-parses to an equal operand
    for (kind, literal) in [
        (OperandKind::Int8, "-128"),
        (OperandKind::Int32, "2147483647"),
        (OperandKind::Float, "3.14"),
        (OperandKind::Double, "0.1"),
    ] {
        let operand = Operand::new(kind, literal).unwrap();
        let reparsed = Operand::new(kind, &operand.to_string()).unwrap();
        assert_eq!(operand, reparsed);
    }
}

#[test]
fn test_verbose_mode_does_not_change_semantics() {
    let mut machine = Machine::builder().verbose(true).build();
    let mut out = Vec::new();
    let result =
        machine.run_source_with_output("push int32(1)\npush int32(2)\nadd\nexit", false, &mut out);
    assert!(result.is_ok());
    // dump/print output is unaffected by verbose tracing
    assert_eq!(out, b"");
    assert_eq!(machine.stack_size(), 0);
}
