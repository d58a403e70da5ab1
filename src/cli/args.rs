//! Clap argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vincular: satellite telemetry dependency inference
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "vincular")]
#[command(version)]
#[command(about = "Infers which telemetry channels drive which from decoded satellite frames")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Normalize a decoded frames file into the satellite cache
    Import(ImportArgs),

    /// Infer the cross-channel dependency graph from telemetry
    Learn(LearnArgs),

    /// Show the resolved configuration and the satellite registry
    Info(InfoArgs),
}

/// Arguments for the import command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ImportArgs {
    /// Path to a decoded telemetry frames JSON file
    #[arg(value_name = "FRAMES")]
    pub input: PathBuf,

    /// Path to YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Satellite name or NORAD id (overrides the configuration)
    #[arg(short, long)]
    pub satellite: Option<String>,

    /// Write normalized frames here instead of the cache path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the learn command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct LearnArgs {
    /// Frames JSON or CSV table to analyze; defaults to the satellite's
    /// cached normalized frames
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Path to YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Satellite name or NORAD id (overrides the configuration)
    #[arg(short, long)]
    pub satellite: Option<String>,

    /// Analyze a single target channel instead of all of them
    #[arg(short, long)]
    pub target: Option<String>,

    /// Grid-search booster hyperparameters per target
    #[arg(short, long)]
    pub gridsearch: bool,

    /// Write the dependency graph here instead of the configured path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the graph edge threshold
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Override the shuffle seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the held-out fraction
    #[arg(long)]
    pub test_fraction: Option<f64>,

    /// CSV cell separator
    #[arg(long, default_value = ",")]
    pub csv_delimiter: char,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Frames JSON file to summarize; without it, show the configuration
    /// and the satellite registry
    #[arg(value_name = "FRAMES")]
    pub input: Option<PathBuf>,

    /// Path to YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for the info command
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(format!(
                "Unknown output format: {s}. Valid formats: text, json, yaml"
            )),
        }
    }
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
