//! # AVM: Abstract Virtual Machine
//!
//! A stack-based virtual machine for a small typed assembly language.
//!
//! Programs are sequences of instructions, one per line, over five numeric
//! operand kinds (`int8`, `int16`, `int32`, `float`, `double`). Values are
//! bounds-checked as they are created, arithmetic promotes to the
//! higher-precision operand, and every valid program terminates with an
//! explicit `exit` instruction.

#![warn(clippy::all)]

pub mod asm;
pub mod error;
pub mod machine;

/// Command-line interface and argument parsing
pub mod cli;
/// Interactive program entry, terminated by ';;'
pub mod repl;
/// Command execution and orchestration
pub mod commands;

// Re-export main types
pub use asm::{Lexer, Parser, Token, TokenKind};
pub use error::{
    AvmError, AvmResult, ErrorReport, LexicalError, OperandError, RuntimeError, SyntaxError,
};
pub use machine::{Instruction, Machine, MachineConfig, Operand, OperandKind, Signal};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create a new machine with the default configuration
pub fn new_machine() -> Machine {
    Machine::new()
}
