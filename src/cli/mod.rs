//! CLI module
//!
//! Parses arguments and dispatches to the command implementations.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{open_store, run_command, serve};
pub use errors::{CliError, CliResult};

/// Parse the process arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
