//! Grid search over booster candidates.
//!
//! Every combination drawn from the candidate lists is scored by k-fold
//! cross-validation on negated mean squared error, the winner is recorded,
//! and the ordinary fit then runs with it. A candidate that cannot be
//! scored is skipped; if none survives, the search fails and surfaces the
//! last underlying error instead of silently falling back to a default.

use serde::{Deserialize, Serialize};

use crate::boost::{BoosterParams, GradientBoost, Objective};
use crate::dataset::{ChannelSeries, PredictorTable};
use crate::error::{Error, Result};
use crate::metrics;
use crate::tracking::RunRecorder;
use crate::xcorr::split::KFold;
use crate::xcorr::strategy::{FitOutcome, FitStrategy, PlainRegression};

/// Candidate lists enumerated by the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateGrid {
    pub objectives: Vec<Objective>,
    pub n_estimators: Vec<usize>,
    pub learning_rates: Vec<f64>,
    pub max_depths: Vec<usize>,
}

impl Default for CandidateGrid {
    fn default() -> Self {
        Self {
            objectives: vec![Objective::SquaredError],
            n_estimators: vec![50, 100, 300],
            learning_rates: vec![0.005, 0.05, 0.1, 0.2],
            max_depths: vec![3, 5, 8, 15],
        }
    }
}

impl CandidateGrid {
    /// Every combination, in nested candidate-list order. Fields the grid
    /// does not cover keep their values from `base`.
    pub fn configurations(&self, base: &BoosterParams) -> Vec<BoosterParams> {
        let mut out = Vec::new();
        for &objective in &self.objectives {
            for &n_estimators in &self.n_estimators {
                for &learning_rate in &self.learning_rates {
                    for &max_depth in &self.max_depths {
                        out.push(BoosterParams {
                            objective,
                            n_estimators,
                            learning_rate,
                            max_depth,
                            ..base.clone()
                        });
                    }
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.objectives.len() * self.n_estimators.len() * self.learning_rates.len() * self.max_depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Grid-search fitting strategy.
#[derive(Debug, Clone)]
pub struct GridSearchRegression {
    base: BoosterParams,
    candidates: CandidateGrid,
    folds: usize,
    test_fraction: f64,
    seed: u64,
}

impl GridSearchRegression {
    pub fn new(
        base: BoosterParams,
        candidates: CandidateGrid,
        folds: usize,
        test_fraction: f64,
        seed: u64,
    ) -> Self {
        Self {
            base,
            candidates,
            folds,
            test_fraction,
            seed,
        }
    }

    /// Mean negated MSE across the fold rotations; higher is better.
    fn score_candidate(
        &self,
        params: &BoosterParams,
        predictors: &PredictorTable,
        target: &ChannelSeries,
    ) -> Result<f64> {
        let folds = KFold::new(self.folds, self.seed).split(predictors.n_rows())?;
        let mut total = 0.0;
        for (train_rows, validation_rows) in &folds {
            let model = GradientBoost::fit(
                params,
                &predictors.select_rows(train_rows),
                &target.select_rows(train_rows),
            )?;
            let predicted = model.predict(&predictors.select_rows(validation_rows));
            let observed = target.select_rows(validation_rows);
            total += metrics::mse(&predicted.to_vec(), &observed.to_vec());
        }
        let score = -(total / folds.len() as f64);
        if !score.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "candidate '{}' produced a non-finite score",
                params.describe()
            )));
        }
        Ok(score)
    }

    /// Scores every candidate and returns the best one. Ties keep the
    /// earlier candidate, so selection is deterministic.
    fn select(&self, predictors: &PredictorTable, target: &ChannelSeries) -> Result<BoosterParams> {
        let mut best: Option<(f64, BoosterParams)> = None;
        let mut last_failure: Option<Error> = None;

        for candidate in self.candidates.configurations(&self.base) {
            match self.score_candidate(&candidate, predictors, target) {
                Ok(score) => {
                    let improves = best.as_ref().map_or(true, |(s, _)| score > *s);
                    if improves {
                        best = Some((score, candidate));
                    }
                }
                Err(err) => last_failure = Some(err),
            }
        }

        match best {
            Some((_, params)) => Ok(params),
            None => {
                let source = last_failure.unwrap_or_else(|| {
                    Error::InvalidParameter("candidate grid is empty".to_string())
                });
                Err(Error::SearchExhausted {
                    source: Box::new(source),
                })
            }
        }
    }
}

impl FitStrategy for GridSearchRegression {
    fn log_run_params(&self, recorder: &mut dyn RunRecorder) {
        recorder.log_param("model", "gradient_boost");
        recorder.log_param("test_fraction", &self.test_fraction.to_string());
        recorder.log_param("search_scoring", "neg_mean_squared_error");
        recorder.log_param("search_folds", &self.folds.to_string());
        recorder.log_param(
            "search_n_estimators",
            &format!("{:?}", self.candidates.n_estimators),
        );
        recorder.log_param(
            "search_learning_rates",
            &format!("{:?}", self.candidates.learning_rates),
        );
        recorder.log_param(
            "search_max_depths",
            &format!("{:?}", self.candidates.max_depths),
        );
    }

    fn fit_and_score(
        &self,
        predictors: &PredictorTable,
        target: &ChannelSeries,
        recorder: &mut dyn RunRecorder,
    ) -> Result<FitOutcome> {
        let winner = self.select(predictors, target)?;
        recorder.log_param(&format!("{} best estimator", target.name), &winner.describe());
        PlainRegression::new(winner, self.test_fraction, self.seed)
            .fit_and_score(predictors, target, recorder)
    }
}
