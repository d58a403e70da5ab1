//! Cross-channel dependency inference.
//!
//! Given a telemetry table, every channel takes a turn as the target of a
//! gradient-boosted fit on all the other channels. How strongly each
//! predictor contributed to each fit accumulates into an importance
//! matrix, the raw material for the dependency graph.

pub mod engine;
pub mod importance;
pub mod search;
pub mod split;
pub mod strategy;

pub use engine::{CrossCorrelator, SearchOptions, XcorrOptions};
pub use importance::{ImportanceMatrix, ImportanceRow, ImportanceTable};
pub use search::{CandidateGrid, GridSearchRegression};
pub use split::{train_test_split, KFold};
pub use strategy::{FitOutcome, FitStrategy, PlainRegression};
