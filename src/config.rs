//! Tool configuration.
//!
//! A single YAML file drives the whole pipeline. Every field has a
//! default, so a partial file only overrides what it names and an absent
//! file means "all defaults". Paths for cached frames, run records and
//! the output graph are derived from `file_layout.root_dir` and the
//! satellite name rather than configured individually.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::boost::BoosterParams;
use crate::error::{Error, Result};
use crate::xcorr::{CandidateGrid, SearchOptions, XcorrOptions};

/// Default working tree root.
pub const DEFAULT_ROOT_DIR: &str = "/tmp/vincular";

const CACHE_DIR: &str = "cache";
const NORMALIZED_FRAMES_FILE: &str = "normalized_frames.json";
const GRAPH_DIR: &str = "graph";
const GRAPH_FILE: &str = "graph.json";
const RUNS_DIR: &str = "runs";
const LOG_DIR: &str = "log";

/// Where the tool keeps its working tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLayout {
    /// Root of the working tree. Satellite data lands under
    /// `<root_dir>/<satellite>/`.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT_DIR)
}

impl Default for FileLayout {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
        }
    }
}

/// Which satellite the pipeline works on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatelliteSection {
    /// Satellite name, e.g. `LightSail-2`. May be left empty and
    /// supplied on the command line instead.
    #[serde(default)]
    pub name: String,
}

/// Analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnSection {
    /// Booster hyperparameters used for every per-target model.
    #[serde(default)]
    pub params: BoosterParams,

    /// Held-out fraction for the per-target evaluation split.
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,

    /// Seed for the split and for fold shuffling.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Run a cross-validated grid search per target instead of fitting
    /// `params` directly.
    #[serde(default)]
    pub gridsearch: bool,

    /// Fold count for the grid search.
    #[serde(default = "default_folds")]
    pub folds: usize,

    /// Whether one failed target aborts the whole analysis.
    #[serde(default = "default_true")]
    pub abort_on_target_error: bool,

    /// Minimum contribution score for a graph edge.
    #[serde(default = "default_graph_threshold")]
    pub graph_threshold: f64,
}

fn default_test_fraction() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_folds() -> usize {
    18
}

fn default_true() -> bool {
    true
}

fn default_graph_threshold() -> f64 {
    crate::graph::DEFAULT_EDGE_THRESHOLD
}

impl Default for LearnSection {
    fn default() -> Self {
        Self {
            params: BoosterParams::default(),
            test_fraction: default_test_fraction(),
            seed: default_seed(),
            gridsearch: false,
            folds: default_folds(),
            abort_on_target_error: default_true(),
            graph_threshold: default_graph_threshold(),
        }
    }
}

impl LearnSection {
    /// Maps the section onto analysis options.
    pub fn to_xcorr_options(&self) -> XcorrOptions {
        let search = if self.gridsearch {
            Some(SearchOptions {
                candidates: CandidateGrid::default(),
                folds: self.folds,
            })
        } else {
            None
        };
        XcorrOptions {
            params: self.params.clone(),
            test_fraction: self.test_fraction,
            seed: self.seed,
            search,
            abort_on_target_error: self.abort_on_target_error,
        }
    }
}

/// Complete tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VincularConfig {
    #[serde(default)]
    pub file_layout: FileLayout,

    #[serde(default)]
    pub satellite: SatelliteSection,

    #[serde(default)]
    pub learn: LearnSection,
}

impl VincularConfig {
    /// Reads and validates a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.learn.to_xcorr_options().validate()?;
        if !(0.0..=1.0).contains(&self.learn.graph_threshold) {
            return Err(Error::InvalidParameter(format!(
                "graph_threshold must lie in [0, 1], got {}",
                self.learn.graph_threshold
            )));
        }
        Ok(())
    }

    /// Satellite name, required for any per-satellite path.
    pub fn satellite_name(&self) -> Result<&str> {
        if self.satellite.name.is_empty() {
            return Err(Error::Config(
                "no satellite configured; set satellite.name or pass --satellite".to_string(),
            ));
        }
        Ok(&self.satellite.name)
    }

    fn satellite_dir(&self) -> Result<PathBuf> {
        Ok(self.file_layout.root_dir.join(self.satellite_name()?))
    }

    /// `<root>/<satellite>/cache`
    pub fn cache_dir(&self) -> Result<PathBuf> {
        Ok(self.satellite_dir()?.join(CACHE_DIR))
    }

    /// `<root>/<satellite>/cache/normalized_frames.json`
    pub fn normalized_file_path(&self) -> Result<PathBuf> {
        Ok(self.cache_dir()?.join(NORMALIZED_FRAMES_FILE))
    }

    /// `<root>/<satellite>/graph`
    pub fn graph_dir(&self) -> Result<PathBuf> {
        Ok(self.satellite_dir()?.join(GRAPH_DIR))
    }

    /// `<root>/<satellite>/graph/graph.json`
    pub fn output_graph_file(&self) -> Result<PathBuf> {
        Ok(self.graph_dir()?.join(GRAPH_FILE))
    }

    /// `<root>/<satellite>/runs`, where analysis run records land.
    pub fn runs_dir(&self) -> Result<PathBuf> {
        Ok(self.satellite_dir()?.join(RUNS_DIR))
    }

    /// `<root>/log`, shared across satellites.
    pub fn log_dir(&self) -> PathBuf {
        self.file_layout.root_dir.join(LOG_DIR)
    }

    /// `<root>/log/<satellite>.log`
    pub fn log_file(&self) -> Result<PathBuf> {
        let name = self.satellite_name()?;
        Ok(self.log_dir().join(format!("{name}.log")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    // ---- Default Tests ----

    #[test]
    fn test_defaults() {
        let config = VincularConfig::default();
        assert_eq!(config.file_layout.root_dir, PathBuf::from("/tmp/vincular"));
        assert!(config.satellite.name.is_empty());
        assert!(!config.learn.gridsearch);
        assert_eq!(config.learn.test_fraction, 0.2);
        assert_eq!(config.learn.seed, 42);
        assert_eq!(config.learn.folds, 18);
        assert!(config.learn.abort_on_target_error);
        assert_eq!(config.learn.graph_threshold, 0.05);
    }

    #[test]
    fn test_empty_yaml_is_all_defaults() {
        let config = VincularConfig::from_yaml("{}").expect("empty mapping should parse");
        assert_eq!(config, VincularConfig::default());
    }

    // ---- Override Tests ----

    #[test]
    fn test_partial_yaml_overrides_only_named_fields() {
        let yaml = r"
file_layout:
  root_dir: /data/telemetry
satellite:
  name: LightSail-2
";
        let config = VincularConfig::from_yaml(yaml).expect("partial config should parse");
        assert_eq!(config.file_layout.root_dir, PathBuf::from("/data/telemetry"));
        assert_eq!(config.satellite.name, "LightSail-2");
        // untouched sections keep their defaults
        assert_eq!(config.learn, LearnSection::default());
    }

    #[test]
    fn test_learn_overrides() {
        let yaml = r"
learn:
  gridsearch: true
  folds: 4
  test_fraction: 0.25
  params:
    n_estimators: 120
    max_depth: 5
";
        let config = VincularConfig::from_yaml(yaml).expect("learn config should parse");
        assert!(config.learn.gridsearch);
        assert_eq!(config.learn.folds, 4);
        assert_eq!(config.learn.test_fraction, 0.25);
        assert_eq!(config.learn.params.n_estimators, 120);
        assert_eq!(config.learn.params.max_depth, 5);
        // unnamed hyperparameters keep booster defaults
        assert_eq!(config.learn.params.learning_rate, 0.1);
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        let yaml = r"
learn:
  test_fraction: 1.5
";
        let err = VincularConfig::from_yaml(yaml).expect_err("fraction out of range should fail");
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_invalid_graph_threshold_rejected() {
        let yaml = r"
learn:
  graph_threshold: 2.0
";
        let err = VincularConfig::from_yaml(yaml).expect_err("threshold out of range should fail");
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    // ---- Path Tests ----

    #[test]
    fn test_derived_paths() {
        let yaml = r"
satellite:
  name: ACRUX-1
";
        let config = VincularConfig::from_yaml(yaml).expect("config should parse");
        assert_eq!(
            config.cache_dir().expect("cache dir"),
            PathBuf::from("/tmp/vincular/ACRUX-1/cache")
        );
        assert_eq!(
            config.normalized_file_path().expect("normalized path"),
            PathBuf::from("/tmp/vincular/ACRUX-1/cache/normalized_frames.json")
        );
        assert_eq!(
            config.output_graph_file().expect("graph path"),
            PathBuf::from("/tmp/vincular/ACRUX-1/graph/graph.json")
        );
        assert_eq!(
            config.runs_dir().expect("runs dir"),
            PathBuf::from("/tmp/vincular/ACRUX-1/runs")
        );
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/vincular/log"));
        assert_eq!(
            config.log_file().expect("log file"),
            PathBuf::from("/tmp/vincular/log/ACRUX-1.log")
        );
    }

    #[test]
    fn test_paths_require_satellite_name() {
        let config = VincularConfig::default();
        assert!(matches!(config.cache_dir(), Err(Error::Config(_))));
        assert!(matches!(config.satellite_name(), Err(Error::Config(_))));
    }

    // ---- Mapping Tests ----

    #[test]
    fn test_to_xcorr_options_without_search() {
        let options = LearnSection::default().to_xcorr_options();
        assert!(options.search.is_none());
        assert_eq!(options.test_fraction, 0.2);
        assert_eq!(options.seed, 42);
    }

    #[test]
    fn test_to_xcorr_options_with_search() {
        let section = LearnSection {
            gridsearch: true,
            folds: 6,
            ..LearnSection::default()
        };
        let options = section.to_xcorr_options();
        let search = options.search.expect("gridsearch should enable search");
        assert_eq!(search.folds, 6);
        assert!(!search.candidates.is_empty());
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = VincularConfig::default();
        config.satellite.name = "ELFIN-A".to_string();
        config.learn.gridsearch = true;

        let yaml = config.to_yaml().expect("serialize should succeed");
        let restored = VincularConfig::from_yaml(&yaml).expect("round trip should parse");
        assert_eq!(restored, config);
    }
}
