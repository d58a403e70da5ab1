//! Vincular CLI
//!
//! Telemetry analysis entry point for the vincular library.
//!
//! # Usage
//!
//! ```bash
//! # Normalize decoded frames into the satellite cache
//! vincular import frames.json --satellite LightSail-2
//!
//! # Infer the dependency graph from the cached frames
//! vincular learn --satellite LightSail-2
//!
//! # Analyze a CSV table with a per-target grid search
//! vincular learn telemetry.csv --satellite LightSail-2 --gridsearch
//!
//! # Show configuration and known satellites
//! vincular info
//! ```

use clap::Parser;
use std::process::ExitCode;
use vincular::cli::{run_command, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
