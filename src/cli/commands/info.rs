//! Info command implementation

use std::path::Path;

use serde::Serialize;

use crate::cli::logging::log;
use crate::cli::{InfoArgs, LogLevel, OutputFormat};
use crate::config::VincularConfig;
use crate::dataset::{table_from_dataset, TelemetryDataset};
use crate::normalize::satellites;

/// What `info FRAMES` reports about a dataset file.
#[derive(Debug, Serialize)]
struct DatasetSummary {
    satellite_name: Option<String>,
    satellite_norad: Option<String>,
    data_format_version: u32,
    frames: usize,
    channels: Vec<String>,
    rows: usize,
}

impl DatasetSummary {
    fn build(path: &Path) -> Result<Self, String> {
        let dataset = TelemetryDataset::load(path).map_err(|e| format!("Frames error: {e}"))?;
        // flattening can come up empty; the summary still has value then
        let (channels, rows) = match table_from_dataset(&dataset) {
            Ok(table) => (table.column_names().to_vec(), table.n_rows()),
            Err(_) => (Vec::new(), 0),
        };
        Ok(Self {
            satellite_name: dataset.metadata.satellite_name.clone(),
            satellite_norad: dataset.metadata.satellite_norad.clone(),
            data_format_version: dataset.metadata.data_format_version,
            frames: dataset.frames.len(),
            channels,
            rows,
        })
    }
}

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    match &args.input {
        Some(path) => {
            let summary = DatasetSummary::build(path)?;
            print_summary(path, &summary, args.format, level)
        }
        None => {
            let config = super::resolve_config(args.config.as_deref(), None)?;
            print_config(&config, args.format, level)
        }
    }
}

fn print_summary(
    path: &Path,
    summary: &DatasetSummary,
    format: OutputFormat,
    level: LogLevel,
) -> Result<(), String> {
    match format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, &format!("Dataset: {}", path.display()));
            match (&summary.satellite_name, &summary.satellite_norad) {
                (Some(name), Some(norad)) => println!("  Satellite: {name} (NORAD {norad})"),
                (Some(name), None) => println!("  Satellite: {name}"),
                _ => println!("  Satellite: (unknown)"),
            }
            println!("  Format version: {}", summary.data_format_version);
            println!("  Frames: {}", summary.frames);
            println!(
                "  Table: {} rows x {} channels",
                summary.rows,
                summary.channels.len()
            );
            for channel in &summary.channels {
                log(level, LogLevel::Verbose, &format!("    {channel}"));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(summary)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(summary)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }
    Ok(())
}

fn print_config(
    config: &VincularConfig,
    format: OutputFormat,
    level: LogLevel,
) -> Result<(), String> {
    match format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Configuration:");
            println!("  Root dir: {}", config.file_layout.root_dir.display());
            if config.satellite.name.is_empty() {
                println!("  Satellite: (not set)");
            } else {
                println!("  Satellite: {}", config.satellite.name);
            }
            println!(
                "  Grid search: {}",
                if config.learn.gridsearch {
                    "enabled"
                } else {
                    "disabled"
                }
            );
            println!("  Held-out fraction: {}", config.learn.test_fraction);
            println!("  Graph threshold: {}", config.learn.graph_threshold);
            println!();
            println!("Known satellites:");
            for sat in satellites() {
                let normalizer = if sat.has_normalizer() {
                    "normalizer available"
                } else {
                    "no normalizer"
                };
                println!("  {} (NORAD {}), {}", sat.name, sat.norad_id, normalizer);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(config)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = config
                .to_yaml()
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }
    Ok(())
}
