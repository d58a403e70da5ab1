//! Importance matrices.
//!
//! The matrix maps every target channel to the contribution each other
//! channel made when predicting it. The column universe is fixed at
//! construction; rows accumulate as targets are analyzed, so a matrix with
//! fewer rows than columns means some channels have not been processed.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Square contribution map under construction.
#[derive(Debug, Clone)]
pub struct ImportanceMatrix {
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    rows: Vec<ImportanceRow>,
    row_index: HashMap<String, usize>,
}

/// One finished row: the scores every channel earned predicting `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceRow {
    pub target: String,
    /// One score per matrix column, in column order.
    pub scores: Vec<f64>,
}

impl ImportanceMatrix {
    /// Fixes the column universe. Rows arrive later through
    /// [`ImportanceMatrix::set_row`].
    pub fn new(channels: &[String]) -> Self {
        let column_index = channels
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self {
            columns: channels.to_vec(),
            column_index,
            rows: Vec::new(),
            row_index: HashMap::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// True once every channel has a row.
    pub fn is_complete(&self) -> bool {
        self.rows.len() == self.columns.len()
    }

    /// Installs the row for `target`, replacing any earlier row for the
    /// same target in place.
    ///
    /// Score keys must belong to the column universe; anything else fails
    /// with [`Error::UnknownChannel`] and indicates an orchestration bug.
    /// Predictors without a score fill in as 0, and the diagonal cell is
    /// forced to 0 no matter what was computed for it.
    pub fn set_row(&mut self, target: &str, scores: &BTreeMap<String, f64>) -> Result<()> {
        let target_idx = *self
            .column_index
            .get(target)
            .ok_or_else(|| Error::UnknownChannel(target.to_string()))?;

        let mut row = vec![0.0; self.columns.len()];
        for (key, &score) in scores {
            match self.column_index.get(key) {
                Some(&col) => row[col] = score,
                None => return Err(Error::UnknownChannel(key.clone())),
            }
        }
        row[target_idx] = 0.0;

        match self.row_index.get(target) {
            Some(&i) => self.rows[i].scores = row,
            None => {
                self.row_index.insert(target.to_string(), self.rows.len());
                self.rows.push(ImportanceRow {
                    target: target.to_string(),
                    scores: row,
                });
            }
        }
        Ok(())
    }

    /// Score of `predictor` in the row for `target`, or `None` when the
    /// target has no row yet or either name is outside the universe.
    pub fn get(&self, target: &str, predictor: &str) -> Option<f64> {
        let row = *self.row_index.get(target)?;
        let col = *self.column_index.get(predictor)?;
        Some(self.rows[row].scores[col])
    }

    pub fn row(&self, target: &str) -> Option<&ImportanceRow> {
        self.row_index.get(target).map(|&i| &self.rows[i])
    }

    /// Owned snapshot for serialization and graph construction.
    pub fn as_table(&self) -> ImportanceTable {
        ImportanceTable {
            columns: self.columns.clone(),
            rows: self.rows.clone(),
        }
    }
}

/// Serializable snapshot of an importance matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceTable {
    pub columns: Vec<String>,
    pub rows: Vec<ImportanceRow>,
}

impl ImportanceTable {
    pub fn get(&self, target: &str, predictor: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == predictor)?;
        self.rows
            .iter()
            .find(|row| row.target == target)
            .map(|row| row.scores[col])
    }

    pub fn is_square(&self) -> bool {
        self.rows.len() == self.columns.len()
    }
}
