//! Flattening decoded datasets into inference tables.
//!
//! The engine wants a rectangular numeric table; dataset files hold ragged
//! frames with mixed value types. Flattening keeps a channel only when it
//! parses as a finite number in every frame it appears in, then keeps the
//! rows that carry all surviving channels, sorted by receive time.
//!
//! A numeric `time` field inside a frame overrides the frame-level
//! timestamp; either way, time becomes the table index and never a channel.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use ndarray::Array2;

use crate::dataset::frames::TelemetryDataset;
use crate::dataset::table::TelemetryTable;
use crate::error::{Error, Result};

/// Default cell separator for CSV input.
pub const DEFAULT_CSV_DELIMITER: u8 = b',';

/// Loads a table from either dataset format, dispatching on the file
/// extension: `.csv` is read as headed CSV, anything else as frames JSON.
pub fn load_table(path: &Path) -> Result<TelemetryTable> {
    load_table_with_delimiter(path, DEFAULT_CSV_DELIMITER)
}

/// Same dispatch with an explicit CSV cell separator.
pub fn load_table_with_delimiter(path: &Path, delimiter: u8) -> Result<TelemetryTable> {
    if path.to_string_lossy().to_lowercase().ends_with(".csv") {
        return table_from_csv(path, delimiter);
    }
    let dataset = TelemetryDataset::load(path)?;
    table_from_dataset(&dataset)
}

/// Flattens a frames dataset into a numeric table.
///
/// Channel order is alphabetical. Fails with [`Error::EmptyDataset`] when
/// no numeric channel survives or no frame carries every channel.
pub fn table_from_dataset(dataset: &TelemetryDataset) -> Result<TelemetryTable> {
    let mut numeric: BTreeSet<String> = BTreeSet::new();
    let mut tainted: BTreeSet<String> = BTreeSet::new();
    let mut records: Vec<(f64, BTreeMap<String, f64>)> = Vec::with_capacity(dataset.frames.len());

    for frame in &dataset.frames {
        let mut values = BTreeMap::new();
        for (name, field) in &frame.fields {
            match field.value.as_f64() {
                Some(v) => {
                    values.insert(name.clone(), v);
                    numeric.insert(name.clone());
                }
                None => {
                    tainted.insert(name.clone());
                }
            }
        }
        let time = values
            .remove("time")
            .unwrap_or_else(|| frame.time.timestamp() as f64);
        records.push((time, values));
    }

    let channels: Vec<String> = numeric
        .difference(&tainted)
        .filter(|name| name.as_str() != "time")
        .cloned()
        .collect();
    if channels.is_empty() {
        return Err(Error::EmptyDataset(
            "no channel is numeric in every frame it appears in".to_string(),
        ));
    }

    let mut rows: Vec<(f64, Vec<f64>)> = Vec::new();
    for (time, values) in records {
        let row: Option<Vec<f64>> = channels
            .iter()
            .map(|c| values.get(c).copied())
            .collect();
        if let Some(row) = row {
            rows.push((time, row));
        }
    }
    build_table(channels, rows)
}

/// Reads a headed CSV file into a numeric table.
///
/// A `time` column is required and becomes the index; it accepts epoch
/// seconds or timestamps in the dataset's frame format. Any other column
/// with a cell that does not parse as a finite number is dropped.
pub fn table_from_csv(path: &Path, delimiter: u8) -> Result<TelemetryTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let time_idx = headers
        .iter()
        .position(|h| h == "time")
        .ok_or_else(|| Error::InvalidInput("CSV input has no 'time' column".to_string()))?;

    let mut tainted: BTreeSet<usize> = BTreeSet::new();
    let mut raw_rows: Vec<(f64, Vec<Option<f64>>)> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let time_cell = record.get(time_idx).unwrap_or("");
        let time = parse_time_cell(time_cell)?;
        let mut row = Vec::with_capacity(headers.len().saturating_sub(1));
        for (col, cell) in record.iter().enumerate() {
            if col == time_idx {
                continue;
            }
            let parsed = cell.parse::<f64>().ok().filter(|v| v.is_finite());
            if parsed.is_none() {
                tainted.insert(col);
            }
            row.push(parsed);
        }
        raw_rows.push((time, row));
    }

    // Columns keep their file order; tainted ones disappear entirely.
    let keep: Vec<usize> = (0..headers.len())
        .filter(|&c| c != time_idx && !tainted.contains(&c))
        .collect();
    if keep.is_empty() {
        return Err(Error::EmptyDataset(format!(
            "no numeric column in '{}'",
            path.display()
        )));
    }
    let channels: Vec<String> = keep.iter().map(|&c| headers[c].clone()).collect();

    let mut rows: Vec<(f64, Vec<f64>)> = Vec::with_capacity(raw_rows.len());
    for (time, cells) in raw_rows {
        let row: Option<Vec<f64>> = keep
            .iter()
            .map(|&c| {
                // cells skip the time column, so re-map the index
                let cell_idx = if c > time_idx { c - 1 } else { c };
                cells[cell_idx]
            })
            .collect();
        if let Some(row) = row {
            rows.push((time, row));
        }
    }
    build_table(channels, rows)
}

fn build_table(channels: Vec<String>, mut rows: Vec<(f64, Vec<f64>)>) -> Result<TelemetryTable> {
    if rows.is_empty() {
        return Err(Error::EmptyDataset(
            "no row carries every numeric channel".to_string(),
        ));
    }
    rows.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n_rows = rows.len();
    let n_cols = channels.len();
    let mut timestamps = Vec::with_capacity(n_rows);
    let mut flat = Vec::with_capacity(n_rows * n_cols);
    for (time, row) in rows {
        timestamps.push(time);
        flat.extend(row);
    }
    let values = Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| Error::InvalidInput(e.to_string()))?;
    TelemetryTable::new(channels, timestamps, values)
}

/// Parses a CSV time cell: epoch seconds, the frame timestamp format, or
/// RFC 3339.
fn parse_time_cell(cell: &str) -> Result<f64> {
    if let Ok(v) = cell.parse::<f64>() {
        if v.is_finite() {
            return Ok(v);
        }
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc().timestamp() as f64);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(cell) {
        return Ok(parsed.timestamp() as f64);
    }
    Err(Error::InvalidInput(format!(
        "cannot parse time cell '{cell}'"
    )))
}
