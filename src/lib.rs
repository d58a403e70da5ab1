//! Vincular: cross-channel dependency inference for satellite telemetry.
//!
//! Decoded telemetry frames go in, a directed dependency graph comes out.
//! Every channel in the telemetry table is fit in turn as the target of a
//! gradient-boosted regression on all the other channels; the share each
//! predictor contributes to that fit becomes one row of an importance
//! matrix, and the thresholded matrix becomes the graph.
//!
//! The pipeline in order:
//! - [`normalize`]: per-satellite engineering-unit conversion of raw frames
//! - [`dataset`]: frame files, CSV tables and the numeric inference table
//! - [`boost`]: the gradient-boosted regression trees behind every fit
//! - [`xcorr`]: per-target fitting, grid search and the importance matrix
//! - [`graph`]: thresholding the matrix into a node/link dependency graph
//! - [`tracking`]: run parameter and metric recording
//!
//! # Example
//!
//! ```
//! use vincular::dataset::TelemetryTable;
//! use vincular::tracking::MemoryRecorder;
//! use vincular::xcorr::{CrossCorrelator, XcorrOptions};
//!
//! let table = TelemetryTable::from_columns(vec![
//!     ("A", vec![4.0, 123.0, 24.2, 3.14, 1.41]),
//!     ("B", vec![7.0, 0.0, 24.2, 3.14, 8.2]),
//! ])?;
//!
//! let mut engine = CrossCorrelator::new(XcorrOptions::default(), MemoryRecorder::new())?;
//! let matrix = engine.infer(&table)?;
//! assert!(matrix.is_complete());
//! # Ok::<(), vincular::Error>(())
//! ```

pub mod boost;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod normalize;
pub mod tracking;
pub mod xcorr;

pub use error::{Error, Result};
