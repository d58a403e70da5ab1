//! Cross-channel dependency engine.
//!
//! One inference run walks the channel list, fits each channel as a
//! target of all the others, and folds the per-target contribution rows
//! into an [`ImportanceMatrix`]. The run recorder sees one metric record
//! per analyzed target plus the run-level configuration.

use serde::{Deserialize, Serialize};

use crate::boost::BoosterParams;
use crate::dataset::TelemetryTable;
use crate::error::{Error, Result};
use crate::tracking::RunRecorder;
use crate::xcorr::importance::ImportanceMatrix;
use crate::xcorr::search::{CandidateGrid, GridSearchRegression};
use crate::xcorr::strategy::{FitStrategy, PlainRegression};

/// Grid-search settings carried by [`XcorrOptions`] when search is on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub candidates: CandidateGrid,
    pub folds: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            candidates: CandidateGrid::default(),
            folds: 18,
        }
    }
}

/// Options governing one inference run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XcorrOptions {
    /// Base booster configuration; the starting point for search mode.
    pub params: BoosterParams,
    /// Fraction of rows held out for per-target error scoring.
    pub test_fraction: f64,
    /// Seed driving every shuffle in the run.
    pub seed: u64,
    /// `Some` switches on grid search before each per-target fit.
    pub search: Option<SearchOptions>,
    /// Abort the run when one target fails. Turning this off records the
    /// failure and carries on, leaving that target's row unset.
    pub abort_on_target_error: bool,
}

impl Default for XcorrOptions {
    fn default() -> Self {
        Self {
            params: BoosterParams::default(),
            test_fraction: 0.2,
            seed: 42,
            search: None,
            abort_on_target_error: true,
        }
    }
}

impl XcorrOptions {
    /// Default options with grid search switched on.
    pub fn with_search(mut self) -> Self {
        self.search = Some(SearchOptions::default());
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "held-out fraction must lie strictly between 0 and 1, got {}",
                self.test_fraction
            )));
        }
        if let Some(search) = &self.search {
            if search.folds < 2 {
                return Err(Error::InvalidParameter(format!(
                    "cross-validation needs at least 2 folds, got {}",
                    search.folds
                )));
            }
        }
        Ok(())
    }

    fn build_strategy(&self) -> Box<dyn FitStrategy> {
        match &self.search {
            None => Box::new(PlainRegression::new(
                self.params.clone(),
                self.test_fraction,
                self.seed,
            )),
            Some(search) => Box::new(GridSearchRegression::new(
                self.params.clone(),
                search.candidates.clone(),
                search.folds,
                self.test_fraction,
                self.seed,
            )),
        }
    }
}

/// The dependency engine: options plus a run recorder.
pub struct CrossCorrelator<R: RunRecorder> {
    options: XcorrOptions,
    recorder: R,
}

impl<R: RunRecorder> CrossCorrelator<R> {
    /// Validates the options up front so a run cannot start half-wrong.
    pub fn new(options: XcorrOptions, recorder: R) -> Result<Self> {
        options.validate()?;
        Ok(Self { options, recorder })
    }

    pub fn options(&self) -> &XcorrOptions {
        &self.options
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn into_recorder(self) -> R {
        self.recorder
    }

    /// Runs one full inference pass over the table.
    ///
    /// Needs at least two channels. Each channel in turn becomes the
    /// target of a fit on all the others; its contribution row lands in
    /// the matrix and its held-out error is recorded as a metric under the
    /// channel name.
    pub fn infer(&mut self, table: &TelemetryTable) -> Result<ImportanceMatrix> {
        let names: Vec<String> = table.column_names().to_vec();
        self.infer_targets(table, &names)
    }

    /// Runs inference for the named targets only.
    ///
    /// Rows for channels outside `targets` stay unset, leaving the matrix
    /// sparse. Useful when a single channel is under investigation.
    pub fn infer_targets(
        &mut self,
        table: &TelemetryTable,
        targets: &[String],
    ) -> Result<ImportanceMatrix> {
        if table.n_channels() < 2 {
            return Err(Error::InvalidInput(format!(
                "cross-channel inference needs at least 2 channels, got {}",
                table.n_channels()
            )));
        }

        let strategy = self.options.build_strategy();
        strategy.log_run_params(&mut self.recorder);

        targets.iter().try_fold(
            ImportanceMatrix::new(table.column_names()),
            |mut matrix, name| -> Result<ImportanceMatrix> {
                let (predictors, target) = table.split_target(name)?;
                match strategy.fit_and_score(&predictors, &target, &mut self.recorder) {
                    Ok(outcome) => {
                        self.recorder.log_metric(name, outcome.rmse);
                        matrix.set_row(name, &outcome.contributions)?;
                        Ok(matrix)
                    }
                    Err(err) if self.options.abort_on_target_error => Err(err),
                    Err(err) => {
                        self.recorder
                            .log_param(&format!("{name} skipped"), &err.to_string());
                        Ok(matrix)
                    }
                }
            },
        )
    }
}
