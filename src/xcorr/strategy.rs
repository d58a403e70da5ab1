//! Per-target fitting strategies.
//!
//! The engine does not care how a target gets fit, only that it comes back
//! with a trained model, one contribution score per predictor, and a
//! held-out error. [`PlainRegression`] does a single fit with fixed
//! parameters; the grid-search strategy in [`crate::xcorr::search`] picks
//! its candidate first and then delegates here.

use std::collections::BTreeMap;

use crate::boost::{BoosterParams, GradientBoost};
use crate::dataset::{ChannelSeries, PredictorTable};
use crate::error::Result;
use crate::metrics;
use crate::tracking::RunRecorder;
use crate::xcorr::split::train_test_split;

/// Everything one per-target fit produces.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    /// The trained model, kept for inspection or reuse.
    pub model: GradientBoost,
    /// Contribution score per predictor channel.
    pub contributions: BTreeMap<String, f64>,
    /// Root-mean-squared error on the held-out partition.
    pub rmse: f64,
}

/// How a single target channel gets fit and scored.
pub trait FitStrategy {
    /// Records run-level parameters once, before any target is processed.
    fn log_run_params(&self, recorder: &mut dyn RunRecorder);

    /// Fits `target` from `predictors` and scores the fit.
    fn fit_and_score(
        &self,
        predictors: &PredictorTable,
        target: &ChannelSeries,
        recorder: &mut dyn RunRecorder,
    ) -> Result<FitOutcome>;
}

/// Single fit with fixed parameters against one held-out partition.
#[derive(Debug, Clone)]
pub struct PlainRegression {
    params: BoosterParams,
    test_fraction: f64,
    seed: u64,
}

impl PlainRegression {
    pub fn new(params: BoosterParams, test_fraction: f64, seed: u64) -> Self {
        Self {
            params,
            test_fraction,
            seed,
        }
    }

    pub fn params(&self) -> &BoosterParams {
        &self.params
    }
}

impl FitStrategy for PlainRegression {
    fn log_run_params(&self, recorder: &mut dyn RunRecorder) {
        recorder.log_param("model", "gradient_boost");
        recorder.log_param("test_fraction", &self.test_fraction.to_string());
        for (key, value) in self.params.to_param_pairs() {
            recorder.log_param(&key, &value);
        }
    }

    fn fit_and_score(
        &self,
        predictors: &PredictorTable,
        target: &ChannelSeries,
        _recorder: &mut dyn RunRecorder,
    ) -> Result<FitOutcome> {
        let (train_rows, held_out_rows) =
            train_test_split(predictors.n_rows(), self.test_fraction, self.seed)?;

        let model = GradientBoost::fit(
            &self.params,
            &predictors.select_rows(&train_rows),
            &target.select_rows(&train_rows),
        )?;

        let predicted = model.predict(&predictors.select_rows(&held_out_rows));
        let observed = target.select_rows(&held_out_rows);
        let rmse = metrics::rmse(&predicted.to_vec(), &observed.to_vec());

        let contributions = predictors
            .names
            .iter()
            .cloned()
            .zip(model.feature_importances())
            .collect();

        Ok(FitOutcome {
            model,
            contributions,
            rmse,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TelemetryTable;
    use crate::tracking::MemoryRecorder;

    fn driven_pair_table() -> TelemetryTable {
        // `b` follows `a` exactly, so predicting either from the other
        // should be easy and attribute everything to the one predictor.
        let a: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let b: Vec<f64> = a.iter().map(|v| 2.0 * v + 1.0).collect();
        TelemetryTable::from_columns(vec![("a", a), ("b", b)]).expect("table should build")
    }

    #[test]
    fn test_plain_fit_scores_single_predictor() {
        let table = driven_pair_table();
        let (predictors, target) = table.split_target("b").expect("split should succeed");

        let strategy = PlainRegression::new(BoosterParams::default(), 0.2, 42);
        let mut recorder = MemoryRecorder::new();
        let outcome = strategy
            .fit_and_score(&predictors, &target, &mut recorder)
            .expect("fit should succeed");

        assert_eq!(outcome.contributions.len(), 1);
        let score = outcome.contributions["a"];
        assert_eq!(score, 1.0, "the only predictor takes every split");
        assert!(outcome.rmse.is_finite());
        assert!(outcome.model.n_trees() > 0);
    }

    #[test]
    fn test_plain_fit_too_few_rows() {
        let table = TelemetryTable::from_columns(vec![
            ("a", vec![1.0, 2.0, 3.0, 4.0]),
            ("b", vec![4.0, 3.0, 2.0, 1.0]),
        ])
        .expect("table should build");
        let (predictors, target) = table.split_target("b").expect("split should succeed");

        let strategy = PlainRegression::new(BoosterParams::default(), 0.2, 42);
        let mut recorder = MemoryRecorder::new();
        let err = strategy
            .fit_and_score(&predictors, &target, &mut recorder)
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::InsufficientData(_)));
    }

    #[test]
    fn test_run_params_include_model_and_knobs() {
        let strategy = PlainRegression::new(BoosterParams::default(), 0.2, 42);
        let mut recorder = MemoryRecorder::new();
        strategy.log_run_params(&mut recorder);

        assert_eq!(recorder.param("model"), Some("gradient_boost"));
        assert_eq!(recorder.param("test_fraction"), Some("0.2"));
        assert_eq!(recorder.param("n_estimators"), Some("80"));
        assert_eq!(recorder.param("max_depth"), Some("8"));
    }

    #[test]
    fn test_fit_is_deterministic_for_a_seed() {
        let table = driven_pair_table();
        let (predictors, target) = table.split_target("a").expect("split should succeed");
        let strategy = PlainRegression::new(BoosterParams::default(), 0.2, 42);

        let mut recorder = MemoryRecorder::new();
        let first = strategy
            .fit_and_score(&predictors, &target, &mut recorder)
            .expect("fit should succeed");
        let second = strategy
            .fit_and_score(&predictors, &target, &mut recorder)
            .expect("fit should succeed");

        assert_eq!(first.rmse, second.rmse);
        assert_eq!(first.contributions, second.contributions);
    }
}
