//! Run tracking.
//!
//! Inference is observable through a small recorder seam: run-level
//! parameters plus one error metric per analyzed target. Recording never
//! fails mid-run — a file-backed recorder buffers in memory and only
//! touches disk when it is finished — so the importance matrix comes out
//! the same whether or not anything listens.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sink for run parameters and per-target metrics.
pub trait RunRecorder {
    /// Records a key/value parameter.
    fn log_param(&mut self, key: &str, value: &str);

    /// Records a named metric value.
    fn log_metric(&mut self, name: &str, value: f64);
}

impl<R: RunRecorder + ?Sized> RunRecorder for &mut R {
    fn log_param(&mut self, key: &str, value: &str) {
        (**self).log_param(key, value);
    }

    fn log_metric(&mut self, name: &str, value: f64) {
        (**self).log_metric(name, value);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

impl RunRecorder for NullRecorder {
    fn log_param(&mut self, _key: &str, _value: &str) {}

    fn log_metric(&mut self, _name: &str, _value: f64) {}
}

/// Serializable record of one inference run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Key/value parameters in emission order.
    pub params: Vec<(String, String)>,
    /// `(metric name, value)` pairs in emission order.
    pub metrics: Vec<(String, f64)>,
}

impl RunRecord {
    pub fn new(run_name: &str) -> Self {
        Self {
            run_name: run_name.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            params: Vec::new(),
            metrics: Vec::new(),
        }
    }
}

/// In-memory recorder, used by tests and for CLI run summaries.
#[derive(Debug)]
pub struct MemoryRecorder {
    record: RunRecord,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self {
            record: RunRecord::new("in-memory"),
        }
    }

    /// Every parameter in emission order, duplicates included.
    pub fn params(&self) -> &[(String, String)] {
        &self.record.params
    }

    /// Every metric in emission order.
    pub fn metrics(&self) -> &[(String, f64)] {
        &self.record.metrics
    }

    /// Latest value logged under `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.record
            .params
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Latest value logged for the metric `name`.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.record
            .metrics
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

impl Default for MemoryRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl RunRecorder for MemoryRecorder {
    fn log_param(&mut self, key: &str, value: &str) {
        self.record
            .params
            .push((key.to_string(), value.to_string()));
    }

    fn log_metric(&mut self, name: &str, value: f64) {
        self.record.metrics.push((name.to_string(), value));
    }
}

/// File-backed recorder: buffers in memory and writes one JSON file per
/// run when finished.
#[derive(Debug)]
pub struct JsonFileRecorder {
    path: PathBuf,
    record: RunRecord,
}

impl JsonFileRecorder {
    /// A recorder that will persist to `{dir}/{run_name}.json`.
    pub fn create(dir: impl AsRef<Path>, run_name: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{run_name}.json")),
            record: RunRecord::new(run_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self) -> &RunRecord {
        &self.record
    }

    /// Stamps the finish time and writes the record, creating the parent
    /// directory if needed. Returns the file path.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.record.finished_at = Some(Utc::now());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.record)?)?;
        Ok(self.path)
    }

    /// Reads a previously written run file.
    pub fn load(path: &Path) -> Result<RunRecord> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}

impl RunRecorder for JsonFileRecorder {
    fn log_param(&mut self, key: &str, value: &str) {
        self.record
            .params
            .push((key.to_string(), value.to_string()));
    }

    fn log_metric(&mut self, name: &str, value: f64) {
        self.record.metrics.push((name.to_string(), value));
    }
}
