//! The virtual machine: lex, parse, execute, clean up
//!
//! One `run` invocation fully lexes the stream, fully parses the tokens,
//! then executes the resulting instructions in order against the owned
//! operand stack. The stack is cleared on every exit path, so each
//! remaining operand is dropped exactly once per run.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::asm::lexer::Lexer;
use crate::asm::parser::Parser;
use crate::error::{AvmError, AvmResult, ErrorReport, RuntimeError};
use crate::machine::instruction::{Instruction, Signal};
use crate::machine::stack::OperandStack;

/// Machine configuration
#[derive(Debug, Clone, Default)]
pub struct MachineConfig {
    /// Collect lexical and syntax errors instead of failing fast
    pub collect_errors: bool,
    /// Print instruction names and stack depth while executing
    pub verbose: bool,
}

/// Builder for a configured machine
#[derive(Debug, Default)]
pub struct MachineBuilder {
    config: MachineConfig,
}

impl MachineBuilder {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        MachineBuilder {
            config: MachineConfig::default(),
        }
    }

    /// Enable/disable error collection mode
    pub fn collect_errors(mut self, enable: bool) -> Self {
        self.config.collect_errors = enable;
        self
    }

    /// Enable/disable verbose stack tracing
    pub fn verbose(mut self, enable: bool) -> Self {
        self.config.verbose = enable;
        self
    }

    /// Build the machine
    pub fn build(self) -> Machine {
        Machine::with_config(self.config)
    }
}

/// The stack machine
pub struct Machine {
    stack: OperandStack,
    config: MachineConfig,
}

impl Machine {
    /// Create a machine with the default configuration
    pub fn new() -> Self {
        Machine::with_config(MachineConfig::default())
    }

    /// Create a machine with an explicit configuration
    pub fn with_config(config: MachineConfig) -> Self {
        Machine {
            stack: OperandStack::new(),
            config,
        }
    }

    /// Start building a configured machine
    pub fn builder() -> MachineBuilder {
        MachineBuilder::new()
    }

    /// Enable/disable verbose stack tracing
    pub fn set_verbose(&mut self, enable: bool) {
        self.config.verbose = enable;
    }

    /// Enable/disable error collection mode
    pub fn set_collect_errors(&mut self, enable: bool) {
        self.config.collect_errors = enable;
    }

    /// Current stack depth
    pub fn stack_size(&self) -> usize {
        self.stack.len()
    }

    /// Run a program from a reader
    ///
    /// Reads the stream to its end, then interprets it; in interactive mode
    /// a `;;` line terminates the program before the physical end.
    pub fn run<R: Read>(&mut self, mut input: R, interactive: bool) -> AvmResult<()> {
        let mut source = String::new();
        input.read_to_string(&mut source)?;
        self.run_source(&source, interactive)
    }

    /// Run a program from a named file
    pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> AvmResult<()> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|_| AvmError::FileNotFound(path.display().to_string()))?;
        self.run_source(&source, false)
    }

    /// Run a program from source text, writing dump/print output to stdout
    pub fn run_source(&mut self, source: &str, interactive: bool) -> AvmResult<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.run_source_with_output(source, interactive, &mut handle)
    }

    /// Run a program from source text, writing dump/print output to `output`
    pub fn run_source_with_output<W: Write>(
        &mut self,
        source: &str,
        interactive: bool,
        output: &mut W,
    ) -> AvmResult<()> {
        let result = self.run_pipeline(source, interactive, output);
        // Cleanup happens on every path: success, failure, early exit
        self.stack.clear();
        result
    }

    fn run_pipeline<W: Write>(
        &mut self,
        source: &str,
        interactive: bool,
        output: &mut W,
    ) -> AvmResult<()> {
        let collect = self.config.collect_errors;

        let mut lexer = Lexer::new(source, interactive, collect);
        let tokens = lexer.tokenize()?;

        let mut parser = Parser::new(tokens, collect);
        let instructions = parser.parse()?;

        if collect {
            let mut report = ErrorReport::new();
            for error in lexer.errors() {
                report.push(format!("Lexical error: {}", error));
            }
            for error in parser.errors() {
                report.push(format!("Syntax error: {}", error));
            }
            // With static errors on record, execution never begins
            if !report.is_empty() {
                return Err(AvmError::Report(report));
            }
        }

        match self.execute(instructions, output) {
            Ok(()) => Ok(()),
            Err(error) if collect => {
                let mut report = ErrorReport::new();
                report.push(error.to_string());
                Err(AvmError::Report(report))
            }
            Err(error) => Err(error),
        }
    }

    /// Execute instructions in order, stopping the instant exit signals
    fn execute<W: Write>(
        &mut self,
        instructions: Vec<Instruction>,
        output: &mut W,
    ) -> AvmResult<()> {
        let mut exited = false;

        for instruction in instructions {
            let name = instruction.name();
            let signal = instruction.execute(&mut self.stack, output)?;
            if self.config.verbose {
                println!("Executed {}. Stack size: {}", name, self.stack.len());
            }
            if signal == Signal::Exit {
                exited = true;
                break;
            }
        }

        if !exited {
            return Err(RuntimeError::MissingExit.into());
        }
        Ok(())
    }
}

impl Default for Machine {
    fn default() -> Self {
        Machine::new()
    }
}
