//! Gradient-boosted tree regression.
//!
//! This is the model family behind every per-channel fit: depth-limited
//! regression trees boosted against squared error, with split counts
//! doubling as the importance signal.

pub mod ensemble;
pub mod params;
mod tree;

pub use ensemble::GradientBoost;
pub use params::{BoosterParams, Objective, PredictorDevice, TreeMethod};
