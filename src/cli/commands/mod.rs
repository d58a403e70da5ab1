//! CLI command implementations

mod import;
mod info;
mod learn;

use std::path::Path;

use crate::cli::logging::LogLevel;
use crate::cli::{Cli, Command};
use crate::config::VincularConfig;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Import(args) => import::run_import(args, log_level),
        Command::Learn(args) => learn::run_learn(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
    }
}

/// Load the configuration file when one is given, defaults otherwise,
/// with the satellite override applied on top.
fn resolve_config(path: Option<&Path>, satellite: Option<&str>) -> Result<VincularConfig, String> {
    let mut config = match path {
        Some(path) => VincularConfig::load(path).map_err(|e| format!("Config error: {e}"))?,
        None => VincularConfig::default(),
    };
    if let Some(name) = satellite {
        config.satellite.name = name.to_string();
    }
    Ok(config)
}
