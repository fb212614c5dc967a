use avm::cli::Cli;
use avm::commands::execute_command;
use avm::error::AvmError;
use avm::machine::MachineConfig;
use avm::repl::start_repl;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process;

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Set up colored output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize logging if debug mode is enabled
    if cli.debug {
        env_logger::init();
    }

    // Handle the command
    let result = match cli.command {
        Some(command) => execute_command(command, cli.debug, cli.verbose, cli.collect_errors),
        None => {
            // Default to the interactive session
            let config = MachineConfig {
                collect_errors: cli.collect_errors,
                verbose: cli.verbose,
            };
            start_repl(None, true, PathBuf::from(".avm_history"), config)
        }
    };

    // Handle any errors
    if let Err(e) = result {
        match e {
            AvmError::Report(report) => {
                for message in report.messages() {
                    eprintln!("{} {}", "Error:".bright_red().bold(), message);
                }
            }
            other => eprintln!("{} {}", "Error:".bright_red().bold(), other),
        }
        process::exit(1);
    }
}
