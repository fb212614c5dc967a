//! Error types for AVM

use std::fmt;

use thiserror::Error;

use crate::machine::operand::OperandKind;

/// Main error type for AVM operations
#[derive(Error, Debug)]
pub enum AvmError {
    /// Lexical analysis errors
    #[error("Lexical error: {0}")]
    Lexical(#[from] LexicalError),

    /// Parsing errors
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// Execution errors
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A named program source could not be resolved
    #[error("Unable to open file {0}")]
    FileNotFound(String),

    /// Errors gathered in collection mode, reported together
    #[error("{0}")]
    Report(ErrorReport),
}

/// Lexer-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// Character that matches no token rule
    #[error("unexpected character '{character}' at line {line}, column {column}")]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
    },
}

/// Parser-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// Identifier in instruction position that names no instruction
    #[error("unknown instruction '{name}' at line {line}")]
    UnknownInstruction { name: String, line: usize },

    /// Token sequence that violates the grammar
    #[error("expected {expected} but got {found} at line {line}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
    },

    /// Missing operand type after push/assert
    #[error("expected operand type (int8, int16, int32, float, double) at line {line}")]
    ExpectedType { line: usize },

    /// Missing numeric value after an operand type
    #[error("expected numeric value at line {line}")]
    ExpectedValue { line: usize },

    /// Operand construction failed while parsing a value
    #[error("invalid operand at line {line}: {source}")]
    Operand { source: OperandError, line: usize },

    /// Program contains no exit instruction
    #[error("program has no 'exit' instruction")]
    MissingExit,
}

/// Operand construction and arithmetic errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    /// Value above the target kind's maximum
    #[error("value {value} overflows {kind}")]
    Overflow { value: String, kind: OperandKind },

    /// Value below the target kind's minimum
    #[error("value {value} underflows {kind}")]
    Underflow { value: String, kind: OperandKind },

    /// Text that is not a well-formed number
    #[error("malformed numeric value '{text}'")]
    MalformedValue { text: String },

    /// Division or modulo with a zero divisor
    #[error("division by zero")]
    DivisionByZero,
}

/// Errors raised while executing instructions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Instruction needs at least one value on the stack
    #[error("{instruction} on empty stack")]
    EmptyStack { instruction: &'static str },

    /// Binary instruction needs at least two values on the stack
    #[error("{instruction} requires two values on the stack")]
    InsufficientValues { instruction: &'static str },

    /// Assert instruction found a kind or value mismatch
    #[error("assert failed: expected {expected}, got {actual}")]
    AssertFailed { expected: String, actual: String },

    /// Program ran out of instructions without executing exit
    #[error("'exit' instruction missing")]
    MissingExit,

    /// Arithmetic failure bubbled up from the operand layer
    #[error(transparent)]
    Operand(#[from] OperandError),
}

/// Ordered collection of error messages gathered in collection mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    messages: Vec<String>,
}

impl ErrorReport {
    /// Create an empty report
    pub fn new() -> Self {
        ErrorReport {
            messages: Vec::new(),
        }
    }

    /// Append one error message
    pub fn push(&mut self, message: String) {
        self.messages.push(message);
    }

    /// Number of collected messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check whether the report is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Collected messages in the order they were found
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", message)?;
        }
        Ok(())
    }
}

/// Result type for AVM operations
pub type AvmResult<T> = Result<T, AvmError>;

/// Result type for lexer operations
pub type LexResult<T> = Result<T, LexicalError>;

/// Result type for parser operations
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Result type for operand operations
pub type OperandResult<T> = Result<T, OperandError>;
