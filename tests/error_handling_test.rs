//! End-to-end tests for AVM error handling
//!
//! Covers the error taxonomy through full program runs in both fail-fast
//! and collection modes.

use avm::error::{AvmError, LexicalError, OperandError, RuntimeError, SyntaxError};
use avm::machine::Machine;

fn run_fail_fast(source: &str) -> avm::AvmResult<()> {
    let mut machine = Machine::new();
    let mut out = Vec::new();
    machine.run_source_with_output(source, false, &mut out)
}

fn run_collecting(source: &str) -> avm::AvmResult<()> {
    let mut machine = Machine::builder().collect_errors(true).build();
    let mut out = Vec::new();
    machine.run_source_with_output(source, false, &mut out)
}

#[test]
fn test_lexical_error_position() {
    let result = run_fail_fast("push int8(1)\n push $ 2\nexit");
    match result {
        Err(AvmError::Lexical(LexicalError::UnexpectedCharacter {
            character,
            line,
            column,
        })) => {
            assert_eq!(character, '$');
            assert_eq!(line, 2);
            assert_eq!(column, 7);
        }
        other => panic!("expected a lexical error, got {:?}", other.err()),
    }
}

#[test]
fn test_unknown_instruction() {
    let result = run_fail_fast("pish int32(1)\nexit");
    assert!(matches!(
        result,
        Err(AvmError::Syntax(SyntaxError::UnknownInstruction { name, line }))
            if name == "pish" && line == 1
    ));
}

#[test]
fn test_missing_exit() {
    let result = run_fail_fast("push int32(1)\npop");
    assert!(matches!(
        result,
        Err(AvmError::Syntax(SyntaxError::MissingExit))
    ));
}

#[test]
fn test_overflow_at_parse_time() {
    let result = run_fail_fast("push int8(300)\nexit");
    assert!(matches!(
        result,
        Err(AvmError::Syntax(SyntaxError::Operand {
            source: OperandError::Overflow { .. },
            line: 1,
        }))
    ));
}

#[test]
fn test_underflow_at_run_time() {
    let result = run_fail_fast("push int8(-100)\npush int8(50)\nsub\nexit");
    assert!(matches!(
        result,
        Err(AvmError::Runtime(RuntimeError::Operand(
            OperandError::Underflow { .. }
        )))
    ));
}

#[test]
fn test_division_and_modulo_by_zero() {
    for op in ["div", "mod"] {
        let source = format!("push int32(10)\npush int32(0)\n{}\nexit", op);
        let result = run_fail_fast(&source);
        assert!(
            matches!(
                result,
                Err(AvmError::Runtime(RuntimeError::Operand(
                    OperandError::DivisionByZero
                )))
            ),
            "{} with a zero divisor must fail",
            op
        );
    }
}

#[test]
fn test_empty_stack_operations() {
    assert!(matches!(
        run_fail_fast("pop\nexit"),
        Err(AvmError::Runtime(RuntimeError::EmptyStack {
            instruction: "pop"
        }))
    ));
    assert!(matches!(
        run_fail_fast("assert int8(1)\nexit"),
        Err(AvmError::Runtime(RuntimeError::EmptyStack {
            instruction: "assert"
        }))
    ));
    assert!(matches!(
        run_fail_fast("print\nexit"),
        Err(AvmError::Runtime(RuntimeError::EmptyStack {
            instruction: "print"
        }))
    ));
}

#[test]
fn test_insufficient_values() {
    let result = run_fail_fast("push int32(1)\nadd\nexit");
    assert!(matches!(
        result,
        Err(AvmError::Runtime(RuntimeError::InsufficientValues {
            instruction: "add"
        }))
    ));
}

#[test]
fn test_assert_mismatch_reports_both_sides() {
    let result = run_fail_fast("push int32(42)\nassert float(42.0)\nexit");
    match result {
        Err(AvmError::Runtime(RuntimeError::AssertFailed { expected, actual })) => {
            assert_eq!(expected, "float(42)");
            assert_eq!(actual, "int32(42)");
        }
        other => panic!("expected an assert failure, got {:?}", other.err()),
    }
}

#[test]
fn test_print_on_non_int8() {
    let result = run_fail_fast("push int32(72)\nprint\nexit");
    assert!(matches!(
        result,
        Err(AvmError::Runtime(RuntimeError::AssertFailed { .. }))
    ));
}

#[test]
fn test_collection_mode_gathers_static_errors() {
    let result = run_collecting("pish int32(1)\npush int8(300)\n@@@\ndump\nexit");
    match result {
        Err(AvmError::Report(report)) => {
            // lexical errors first, then syntax errors, in source order
            assert_eq!(report.len(), 4);
            assert!(report.messages()[0].contains("unexpected character '@'"));
            assert!(report.messages()[1].contains("unknown instruction 'pish'"));
            assert!(report.messages()[2].contains("overflows int8"));
            assert!(report.messages()[3].contains("unknown instruction '@'"));
        }
        other => panic!("expected a report, got {:?}", other.err()),
    }
}

#[test]
fn test_collection_mode_never_executes_with_static_errors() {
    let mut machine = Machine::builder().collect_errors(true).build();
    let mut out = Vec::new();
    let result =
        machine.run_source_with_output("pish int32(1)\npush int8(7)\ndump\nexit", false, &mut out);
    assert!(matches!(result, Err(AvmError::Report(_))));
    assert_eq!(out, b"", "no instruction may run when static errors exist");
    assert_eq!(machine.stack_size(), 0);
}

#[test]
fn test_collection_mode_reports_runtime_errors() {
    let result = run_collecting("push int32(10)\npush int32(0)\ndiv\nexit");
    match result {
        Err(AvmError::Report(report)) => {
            assert_eq!(report.len(), 1);
            assert!(report.messages()[0].contains("division by zero"));
        }
        other => panic!("expected a report, got {:?}", other.err()),
    }
}

#[test]
fn test_fail_fast_stops_at_first_defect() {
    // the second defect is never reached
    let result = run_fail_fast("pish int32(1)\npush int8(300)\nexit");
    assert!(matches!(
        result,
        Err(AvmError::Syntax(SyntaxError::UnknownInstruction { .. }))
    ));
}

#[test]
fn test_error_display_messages() {
    let err = run_fail_fast("push int8(128)\nexit").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error: invalid operand at line 1: value 128 overflows int8"
    );

    let err = run_fail_fast("pop\nexit").unwrap_err();
    assert_eq!(err.to_string(), "Runtime error: pop on empty stack");
}
