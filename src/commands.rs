use crate::cli::Commands;
use crate::error::AvmResult;
use crate::machine::{Machine, MachineConfig};
use crate::repl::start_repl;
use colored::*;
use std::path::PathBuf;

/// Execute a CLI command
pub fn execute_command(
    command: Commands,
    debug: bool,
    verbose: bool,
    collect_errors: bool,
) -> AvmResult<()> {
    let config = MachineConfig {
        collect_errors,
        verbose,
    };

    match command {
        Commands::Interactive {
            load,
            banner,
            history_file,
        } => start_repl(load, banner, history_file, config),
        Commands::Run { file } => execute_run(file, config, debug),
    }
}

fn execute_run(file: PathBuf, config: MachineConfig, debug: bool) -> AvmResult<()> {
    if debug {
        println!(
            "{} Running file: {}",
            "DEBUG:".bright_yellow(),
            file.display()
        );
    }

    let mut machine = Machine::with_config(config);
    machine.run_file(&file)
}
