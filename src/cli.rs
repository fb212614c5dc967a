use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

/// AVM - Abstract Virtual Machine
/// A stack-based virtual machine for a typed assembly language
#[derive(Parser)]
#[command(name = "avm")]
#[command(author = "AVM Team")]
#[command(version = "0.1.0")]
#[command(about = "Abstract Virtual Machine - stack machine for a typed assembly language")]
#[command(long_about = "
AVM interprets a small assembly language over five numeric operand types:
- One instruction per line; comments start with ';'
- Values are bounds-checked as they are created
- Arithmetic promotes to the higher-precision operand
- Every program must terminate with an explicit 'exit'

Usage examples:
  avm                     # Read a program interactively (end with ';;')
  avm run program.avm     # Run a program file
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output (stack depth after each instruction)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Collect and report all lexical and syntax errors in one pass
    #[arg(short = 'e', long, global = true)]
    pub collect_errors: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Available commands for the AVM CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Read a program interactively, terminated by ';;' (default)
    #[command(alias = "repl")]
    Interactive {
        /// Load and run a program file at startup
        #[arg(short, long)]
        load: Option<PathBuf>,

        /// Show startup banner
        #[arg(short, long, default_value = "true")]
        banner: bool,

        /// History file path
        #[arg(long, default_value = ".avm_history")]
        history_file: PathBuf,
    },

    /// Run a program file
    Run {
        /// Path to the program file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

pub fn print_banner() {
    println!(
        "{}",
        "
 █████╗ ██╗   ██╗███╗   ███╗
██╔══██╗██║   ██║████╗ ████║
███████║██║   ██║██╔████╔██║
██╔══██║╚██╗ ██╔╝██║╚██╔╝██║
██║  ██║ ╚████╔╝ ██║ ╚═╝ ██║
╚═╝  ╚═╝  ╚═══╝  ╚═╝     ╚═╝
"
        .bright_cyan()
    );

    println!("{}", "Abstract Virtual Machine".bright_white().bold());
    println!("{}", format!("Version {}", crate::VERSION).dimmed());
    println!(
        "{}",
        "Enter a program line by line; ';;' runs it. Type 'help' for commands.".dimmed()
    );
    println!();
}

pub fn print_help() {
    println!("{}", "Available commands:".bright_yellow().bold());
    println!("  {}  - Show this help message", "help".bright_green());
    println!("  {}  - Exit the session", "quit".bright_green());
    println!("  {}  - Clear the screen", "clear".bright_green());
    println!("  {}  - Show system information", "info".bright_green());
    println!("  {}  - Discard the pending program", "reset".bright_green());
    println!("  {}  - Show the pending program lines", "history".bright_green());
    println!("  {}  - Load a program file", "load <file>".bright_green());
    println!("  {}  - Run the pending program", ";;".bright_green());
    println!();
    println!("{}", "Instructions:".bright_yellow().bold());
    println!("  {}  - Push a value onto the stack", "push int32(42)".bright_blue());
    println!("  {}  - Check the top of the stack", "assert int32(42)".bright_blue());
    println!("  {}  - Remove the top of the stack", "pop".bright_blue());
    println!("  {}  - Print every stacked value", "dump".bright_blue());
    println!(
        "  {}  - Arithmetic on the top two values",
        "add sub mul div mod".bright_blue()
    );
    println!("  {}  - Print the top int8 as a character", "print".bright_blue());
    println!("  {}  - Terminate the program", "exit".bright_blue());
    println!();
    println!("{}", "Operand types:".bright_yellow().bold());
    println!(
        "  {}",
        "int8 int16 int32 float double (promotion in that order)".bright_blue()
    );
    println!();
}

pub fn print_info() {
    println!("{}", "AVM System Information".bright_yellow().bold());
    println!("  Version: {}", crate::VERSION.bright_green());
    println!(
        "  Build: {}",
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        }
        .bright_green()
    );
    println!("  Target: {}", std::env::consts::ARCH.bright_green());
    println!();

    println!("{}", "Language features:".bright_yellow().bold());
    println!("  ✓ Eleven instructions over a typed operand stack");
    println!("  ✓ Five numeric operand kinds with precision promotion");
    println!("  ✓ Bounds-checked value construction and arithmetic");
    println!("  ✓ Fail-fast or collect-all error reporting");
    println!("  ✓ File and interactive program sources");
    println!();
}
