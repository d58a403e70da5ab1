//! Learn command implementation

use chrono::Utc;

use crate::cli::logging::log;
use crate::cli::{LearnArgs, LogLevel};
use crate::dataset::load_table_with_delimiter;
use crate::graph::DependencyGraph;
use crate::tracking::JsonFileRecorder;
use crate::xcorr::CrossCorrelator;

pub fn run_learn(args: LearnArgs, level: LogLevel) -> Result<(), String> {
    let mut config = super::resolve_config(args.config.as_deref(), args.satellite.as_deref())?;
    if args.gridsearch {
        config.learn.gridsearch = true;
    }
    if let Some(threshold) = args.threshold {
        config.learn.graph_threshold = threshold;
    }
    if let Some(seed) = args.seed {
        config.learn.seed = seed;
    }
    if let Some(fraction) = args.test_fraction {
        config.learn.test_fraction = fraction;
    }
    config
        .validate()
        .map_err(|e| format!("Config error: {e}"))?;

    let input = match &args.input {
        Some(path) => path.clone(),
        None => config
            .normalized_file_path()
            .map_err(|e| format!("Config error: {e}"))?,
    };
    let delimiter = u8::try_from(args.csv_delimiter)
        .map_err(|_| "CSV delimiter must be a single ASCII character".to_string())?;

    log(
        level,
        LogLevel::Normal,
        &format!("Analyzing {}", input.display()),
    );

    let table =
        load_table_with_delimiter(&input, delimiter).map_err(|e| format!("Input error: {e}"))?;
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Table: {} rows x {} channels",
            table.n_rows(),
            table.n_channels()
        ),
    );

    let runs_dir = config.runs_dir().map_err(|e| format!("Config error: {e}"))?;
    let run_name = format!("xcorr-{}", Utc::now().format("%Y%m%d-%H%M%S"));
    let recorder = JsonFileRecorder::create(&runs_dir, &run_name);

    let mut engine = CrossCorrelator::new(config.learn.to_xcorr_options(), recorder)
        .map_err(|e| format!("Options error: {e}"))?;
    let matrix = match &args.target {
        Some(target) => engine.infer_targets(&table, std::slice::from_ref(target)),
        None => engine.infer(&table),
    }
    .map_err(|e| format!("Analysis error: {e}"))?;

    let graph = DependencyGraph::from_importance(&matrix.as_table(), config.learn.graph_threshold);
    let output = match &args.output {
        Some(path) => path.clone(),
        None => config
            .output_graph_file()
            .map_err(|e| format!("Config error: {e}"))?,
    };
    graph
        .save(&output)
        .map_err(|e| format!("Write error: {e}"))?;

    let record = engine
        .into_recorder()
        .finish()
        .map_err(|e| format!("Run record error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Dependency graph: {} ({} nodes, {} links)",
            output.display(),
            graph.n_nodes(),
            graph.n_links()
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("  Run record: {}", record.display()),
    );
    Ok(())
}
