//! Command-line interface.
//!
//! Argument definitions, command handlers and console output helpers.

mod args;
mod commands;
mod logging;

pub use args::{parse_args, Cli, Command, ImportArgs, InfoArgs, LearnArgs, OutputFormat};
pub use commands::run_command;
pub use logging::LogLevel;
