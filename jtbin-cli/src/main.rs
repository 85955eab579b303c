//! jtbin CLI
//!
//! Command-line interface for extracting data from JTBIN MRA descriptors.

mod cli_types;
mod commands;
mod error;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::config::{run_config_path, run_config_show};
use commands::extract::run_extract;
use commands::keys::run_keys;
use error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.quiet, cli.verbose);

    let result: Result<(), CliError> = match cli.command {
        Commands::Extract { args } => run_extract(cli.root, args).map(|_| ()),
        Commands::Keys { hex, mra, region } => run_keys(hex, mra, region),
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(cli.root),
            ConfigAction::Path => {
                run_config_path();
                Ok(())
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
