//! Import command implementation

use crate::cli::logging::{log, warn};
use crate::cli::{ImportArgs, LogLevel};
use crate::dataset::{DatasetMetadata, TelemetryDataset};
use crate::normalize::{find_satellite, normalize_frames};

pub fn run_import(args: ImportArgs, level: LogLevel) -> Result<(), String> {
    let config = super::resolve_config(args.config.as_deref(), args.satellite.as_deref())?;
    let name = config
        .satellite_name()
        .map_err(|e| format!("Config error: {e}"))?;
    let satellite = find_satellite(name).map_err(|e| format!("Satellite error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Importing {} for {}", args.input.display(), satellite.name),
    );

    let dataset = TelemetryDataset::load(&args.input).map_err(|e| format!("Frames error: {e}"))?;
    let decoded = dataset.frames.len();

    let frames = if satellite.has_normalizer() {
        let normalizer = satellite
            .normalizer()
            .map_err(|e| format!("Satellite error: {e}"))?;
        normalize_frames(normalizer.as_ref(), &dataset.frames)
    } else {
        warn(
            level,
            &format!(
                "no normalizer registered for {}; keeping frames as decoded",
                satellite.name
            ),
        );
        dataset.frames
    };

    let output = match &args.output {
        Some(path) => path.clone(),
        None => config
            .normalized_file_path()
            .map_err(|e| format!("Config error: {e}"))?,
    };

    let metadata = DatasetMetadata::for_satellite(satellite.norad_id, satellite.name);
    let normalized = TelemetryDataset::new(metadata, frames);
    normalized
        .save(&output)
        .map_err(|e| format!("Write error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Normalized frames: {}", output.display()),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("  Frames decoded: {decoded}"),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("  Frames kept: {}", normalized.frames.len()),
    );
    Ok(())
}
