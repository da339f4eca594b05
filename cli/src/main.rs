mod changelog;
mod cli;
mod error;
mod package_version;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use error::CliError;
use std::process;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Changelog { file, action } => changelog::execute(&file, action),
        Commands::Version {
            changelog,
            descriptor,
            action,
        } => package_version::execute(&changelog, descriptor, action).map_err(CliError::from),
    };

    if let Err(err) = result {
        if err.is_warning() {
            eprintln!("{} {}", "Warning:".bold().yellow(), err.user_message());
        } else {
            eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        }
        process::exit(1);
    }
}
