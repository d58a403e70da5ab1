//! Gradient-boosted regression ensembles.
//!
//! The ensemble starts from the target mean and fits one tree per round to
//! the current residuals, shrunk by the learning rate. Fitting stops early
//! once the residuals vanish; extra rounds would only append splitless
//! stumps.

use ndarray::{Array1, Array2, ArrayView1};

use crate::boost::params::BoosterParams;
use crate::boost::tree::RegressionTree;
use crate::error::{Error, Result};

/// Residuals whose magnitude stays under this are considered fit.
const RESIDUAL_FLOOR: f64 = 1e-12;

/// A fitted gradient-boosting model for one target channel.
#[derive(Debug, Clone)]
pub struct GradientBoost {
    params: BoosterParams,
    base_score: f64,
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl GradientBoost {
    /// Fits an ensemble on the given feature matrix and targets.
    ///
    /// Fails with [`Error::InvalidParameter`] on degenerate configuration
    /// or mismatched shapes.
    pub fn fit(params: &BoosterParams, features: &Array2<f64>, targets: &Array1<f64>) -> Result<Self> {
        params.validate()?;
        let n = features.nrows();
        if n == 0 {
            return Err(Error::InvalidParameter(
                "cannot fit on zero rows".to_string(),
            ));
        }
        if features.ncols() == 0 {
            return Err(Error::InvalidParameter(
                "cannot fit with zero features".to_string(),
            ));
        }
        if targets.len() != n {
            return Err(Error::InvalidParameter(format!(
                "feature matrix has {n} rows but {} targets were given",
                targets.len()
            )));
        }

        let base_score = targets.mean().unwrap_or(0.0);
        let mut predictions = vec![base_score; n];
        let mut residuals: Vec<f64> = targets.iter().map(|y| y - base_score).collect();

        let mut trees = Vec::new();
        for _ in 0..params.n_estimators {
            if residuals.iter().all(|r| r.abs() < RESIDUAL_FLOOR) {
                break;
            }
            let tree = RegressionTree::fit(features, &residuals, params.max_depth);
            for (i, row) in features.rows().into_iter().enumerate() {
                predictions[i] += params.learning_rate * tree.predict_row(row);
                residuals[i] = targets[i] - predictions[i];
            }
            trees.push(tree);
        }

        Ok(Self {
            params: params.clone(),
            base_score,
            trees,
            n_features: features.ncols(),
        })
    }

    pub fn predict(&self, features: &Array2<f64>) -> Array1<f64> {
        features
            .rows()
            .into_iter()
            .map(|row| self.predict_row(row))
            .collect()
    }

    pub fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let boosted: f64 = self.trees.iter().map(|tree| tree.predict_row(row)).sum();
        self.base_score + self.params.learning_rate * boosted
    }

    /// Split-count feature importances.
    ///
    /// Each score is the fraction of the ensemble's split decisions that
    /// test the feature. The scores sum to 1 whenever any split exists and
    /// are all zero for a splitless ensemble.
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut counts = vec![0u64; self.n_features];
        for tree in &self.trees {
            tree.accumulate_split_counts(&mut counts);
        }
        let total: u64 = counts.iter().sum();
        if total == 0 {
            return vec![0.0; self.n_features];
        }
        counts
            .iter()
            .map(|&c| c as f64 / total as f64)
            .collect()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    pub fn params(&self) -> &BoosterParams {
        &self.params
    }
}
