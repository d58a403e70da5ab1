//! Booster configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Loss objective for the booster.
///
/// Squared error is the only objective the candidate space enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    #[default]
    SquaredError,
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::SquaredError => write!(f, "squared_error"),
        }
    }
}

/// Split enumeration hint. The builder always runs exact greedy search;
/// the hint is recorded with the run, not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeMethod {
    #[default]
    Auto,
    Exact,
    Hist,
}

impl fmt::Display for TreeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeMethod::Auto => write!(f, "auto"),
            TreeMethod::Exact => write!(f, "exact"),
            TreeMethod::Hist => write!(f, "hist"),
        }
    }
}

/// Prediction device hint. Recorded with the run, not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictorDevice {
    #[default]
    Cpu,
    Gpu,
}

impl fmt::Display for PredictorDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictorDevice::Cpu => write!(f, "cpu"),
            PredictorDevice::Gpu => write!(f, "gpu"),
        }
    }
}

/// Gradient-boosting configuration.
///
/// Defaults mirror the settings the learn pipeline has always shipped
/// with: 80 boosting rounds, shrinkage 0.1, depth-8 trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoosterParams {
    pub objective: Objective,
    pub n_estimators: usize,
    pub learning_rate: f64,
    pub max_depth: usize,
    /// Worker-count hint; negative means all cores. Recorded, not consulted.
    pub n_jobs: i32,
    pub tree_method: TreeMethod,
    pub predictor: PredictorDevice,
}

impl Default for BoosterParams {
    fn default() -> Self {
        Self {
            objective: Objective::SquaredError,
            n_estimators: 80,
            learning_rate: 0.1,
            max_depth: 8,
            n_jobs: -1,
            tree_method: TreeMethod::Auto,
            predictor: PredictorDevice::Cpu,
        }
    }
}

impl BoosterParams {
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(Error::InvalidParameter(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if self.max_depth == 0 {
            return Err(Error::InvalidParameter(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Key/value pairs recorded with a run.
    pub fn to_param_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("objective".to_string(), self.objective.to_string()),
            ("n_estimators".to_string(), self.n_estimators.to_string()),
            ("learning_rate".to_string(), self.learning_rate.to_string()),
            ("max_depth".to_string(), self.max_depth.to_string()),
            ("n_jobs".to_string(), self.n_jobs.to_string()),
            ("tree_method".to_string(), self.tree_method.to_string()),
            ("predictor".to_string(), self.predictor.to_string()),
        ]
    }

    /// One-line summary, used when the search records its winning
    /// candidate.
    pub fn describe(&self) -> String {
        format!(
            "objective={} n_estimators={} learning_rate={} max_depth={}",
            self.objective, self.n_estimators, self.learning_rate, self.max_depth
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = BoosterParams::default();
        assert_eq!(params.objective, Objective::SquaredError);
        assert_eq!(params.n_estimators, 80);
        assert_eq!(params.learning_rate, 0.1);
        assert_eq!(params.max_depth, 8);
        assert_eq!(params.n_jobs, -1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_degenerate_values() {
        let params = BoosterParams {
            n_estimators: 0,
            ..BoosterParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidParameter(_))
        ));

        let params = BoosterParams {
            learning_rate: 0.0,
            ..BoosterParams::default()
        };
        assert!(params.validate().is_err());

        let params = BoosterParams {
            learning_rate: f64::NAN,
            ..BoosterParams::default()
        };
        assert!(params.validate().is_err());

        let params = BoosterParams {
            max_depth: 0,
            ..BoosterParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip_with_defaults() {
        let yaml = "n_estimators: 100\nlearning_rate: 0.05\n";
        let params: BoosterParams = serde_yaml::from_str(yaml).expect("parse should succeed");
        assert_eq!(params.n_estimators, 100);
        assert_eq!(params.learning_rate, 0.05);
        // unspecified fields fall back to defaults
        assert_eq!(params.max_depth, 8);
        assert_eq!(params.tree_method, TreeMethod::Auto);
    }

    #[test]
    fn test_param_pairs_cover_every_knob() {
        let pairs = BoosterParams::default().to_param_pairs();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            [
                "objective",
                "n_estimators",
                "learning_rate",
                "max_depth",
                "n_jobs",
                "tree_method",
                "predictor"
            ]
        );
    }

    #[test]
    fn test_describe_is_compact() {
        let line = BoosterParams::default().describe();
        assert!(line.contains("n_estimators=80"));
        assert!(line.contains("learning_rate=0.1"));
    }
}
