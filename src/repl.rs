//! Interactive session: accumulate a program line by line, run it on ';;'

use crate::cli::{print_banner, print_help, print_info};
use crate::error::{AvmError, AvmResult};
use crate::machine::{Machine, MachineConfig};
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use std::path::PathBuf;

/// State of one interactive session
pub struct ReplState {
    machine: Machine,
    /// Program lines accumulated since the last run
    pending: Vec<String>,
}

impl ReplState {
    pub fn new(config: MachineConfig) -> Self {
        ReplState {
            machine: Machine::with_config(config),
            pending: Vec::new(),
        }
    }

    /// Append one program line
    pub fn push_line(&mut self, line: &str) {
        self.pending.push(line.to_string());
    }

    /// Run the accumulated program and clear it
    pub fn run_pending(&mut self) -> AvmResult<()> {
        let source = self.pending.join("\n");
        self.pending.clear();
        self.machine.run_source(&source, true)
    }

    /// Discard the accumulated program
    pub fn reset(&mut self) {
        self.pending.clear();
        println!("{}", "Pending program discarded".bright_green());
    }

    /// Show the accumulated program lines
    pub fn show_pending(&self) {
        if self.pending.is_empty() {
            println!("{}", "No pending program".dimmed());
            return;
        }
        for (i, line) in self.pending.iter().enumerate() {
            println!("{} {}", format!("[{}]", i + 1).dimmed(), line);
        }
    }

    /// Run a program file through this session's machine
    pub fn load_file(&mut self, path: &PathBuf) -> AvmResult<()> {
        println!("{} {}", "Loading:".bright_yellow(), path.display());
        self.machine.run_file(path)?;
        println!("{} {}", "Completed:".bright_green(), path.display());
        Ok(())
    }
}

/// Start an interactive session
pub fn start_repl(
    load_file: Option<PathBuf>,
    show_banner: bool,
    history_file: PathBuf,
    config: MachineConfig,
) -> AvmResult<()> {
    let mut state = ReplState::new(config);
    let mut rl = Editor::<(), rustyline::history::DefaultHistory>::new()
        .map_err(|e| AvmError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    // Load history if it exists
    if history_file.exists() {
        if let Err(e) = rl.load_history(&history_file) {
            eprintln!("Warning: Could not load history: {}", e);
        }
    }

    if show_banner {
        print_banner();
    }

    // Load file if specified
    if let Some(file) = load_file {
        if let Err(e) = state.load_file(&file) {
            eprintln!("{} {}", "Error loading file:".bright_red(), e);
        }
        println!();
    }

    loop {
        let prompt = if state.pending.is_empty() {
            "avm> ".bright_green().bold()
        } else {
            "avm| ".bright_green()
        };

        match rl.readline(&prompt.to_string()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match line {
                    ";;" => {
                        if let Err(e) = state.run_pending() {
                            report_error(&e);
                        }
                    }
                    "quit" | ":q" => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    "help" | ":h" => {
                        print_help();
                    }
                    "clear" | ":c" => {
                        print!("\x1B[2J\x1B[1;1H");
                    }
                    "info" | ":i" => {
                        print_info();
                    }
                    "reset" | ":r" => {
                        state.reset();
                    }
                    "history" | ":hist" => {
                        state.show_pending();
                    }
                    _ => {
                        if let Some(path) = line.strip_prefix("load ") {
                            let path = PathBuf::from(path.trim());
                            if let Err(e) = state.load_file(&path) {
                                report_error(&e);
                            }
                        } else {
                            state.push_line(line);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".bright_red(), e);
                break;
            }
        }
    }

    if let Err(e) = rl.save_history(&history_file) {
        eprintln!("Warning: Could not save history: {}", e);
    }

    Ok(())
}

fn report_error(error: &AvmError) {
    match error {
        AvmError::Report(report) => {
            for message in report.messages() {
                eprintln!("{} {}", "Error:".bright_red().bold(), message);
            }
        }
        other => eprintln!("{} {}", "Error:".bright_red().bold(), other),
    }
}
