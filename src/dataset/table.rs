//! Rectangular numeric telemetry table.
//!
//! A [`TelemetryTable`] is the engine's canonical input: one named column
//! per channel, one row per decoded frame, every cell a finite `f64`. The
//! time index is carried for provenance and row ordering only; inference
//! never consumes it as a feature.

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::error::{Error, Result};

/// Time-indexed table of numeric telemetry channels.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryTable {
    columns: Vec<String>,
    timestamps: Vec<f64>,
    values: Array2<f64>,
}

impl TelemetryTable {
    /// Builds a table from column names, a time index, and a row-major
    /// value matrix.
    ///
    /// Fails with [`Error::InvalidInput`] if names repeat, shapes disagree,
    /// or any cell is non-finite.
    pub fn new(columns: Vec<String>, timestamps: Vec<f64>, values: Array2<f64>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::InvalidInput("table has no columns".to_string()));
        }
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(Error::InvalidInput(format!(
                    "duplicate column name '{name}'"
                )));
            }
        }
        if values.ncols() != columns.len() {
            return Err(Error::InvalidInput(format!(
                "value matrix has {} columns but {} names were given",
                values.ncols(),
                columns.len()
            )));
        }
        if values.nrows() != timestamps.len() {
            return Err(Error::InvalidInput(format!(
                "value matrix has {} rows but the time index has {} entries",
                values.nrows(),
                timestamps.len()
            )));
        }
        for ((row, col), v) in values.indexed_iter() {
            if !v.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "non-finite value {v} at row {row} in column '{}'",
                    columns[col]
                )));
            }
        }
        Ok(Self {
            columns,
            timestamps,
            values,
        })
    }

    /// Builds a table from `(name, values)` pairs with an implicit
    /// `0..n` time index. All columns must have equal length.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::InvalidInput("table has no columns".to_string()));
        }
        let n_rows = columns[0].1.len();
        let n_cols = columns.len();
        let mut names = Vec::with_capacity(n_cols);
        let mut flat = vec![0.0; n_rows * n_cols];
        for (c, (name, series)) in columns.into_iter().enumerate() {
            let name = name.into();
            if series.len() != n_rows {
                return Err(Error::InvalidInput(format!(
                    "column '{name}' has {} rows, expected {n_rows}",
                    series.len()
                )));
            }
            for (r, v) in series.into_iter().enumerate() {
                flat[r * n_cols + c] = v;
            }
            names.push(name);
        }
        let values = Array2::from_shape_vec((n_rows, n_cols), flat)
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
        let timestamps = (0..n_rows).map(|i| i as f64).collect();
        Self::new(names, timestamps, values)
    }

    /// Column names in table order. This is the fixed channel universe
    /// handed to the importance matrix.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_channels(&self) -> usize {
        self.columns.len()
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// View of one named column, or `None` if the channel is absent.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.values.column(idx))
    }

    /// Splits the table into one target channel and the remaining
    /// predictor block, copying both.
    ///
    /// Fails with [`Error::UnknownChannel`] if `target` is not a column.
    pub fn split_target(&self, target: &str) -> Result<(PredictorTable, ChannelSeries)> {
        let target_idx = self
            .columns
            .iter()
            .position(|c| c == target)
            .ok_or_else(|| Error::UnknownChannel(target.to_string()))?;

        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&c| c != target_idx)
            .collect();
        let names = keep.iter().map(|&c| self.columns[c].clone()).collect();
        let predictors = PredictorTable {
            names,
            values: self.values.select(Axis(1), &keep),
        };
        let series = ChannelSeries {
            name: target.to_string(),
            values: self.values.column(target_idx).to_owned(),
        };
        Ok((predictors, series))
    }
}

/// Predictor block for one target: every table column except the target.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorTable {
    pub names: Vec<String>,
    pub values: Array2<f64>,
}

impl PredictorTable {
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    /// Copies the given rows into a new matrix, in index order.
    pub fn select_rows(&self, indices: &[usize]) -> Array2<f64> {
        self.values.select(Axis(0), indices)
    }
}

/// A single named channel as a dense vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSeries {
    pub name: String,
    pub values: Array1<f64>,
}

impl ChannelSeries {
    /// Copies the given rows into a new vector, in index order.
    pub fn select_rows(&self, indices: &[usize]) -> Array1<f64> {
        self.values.select(Axis(0), indices)
    }
}
