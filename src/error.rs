//! Crate-wide error type

use thiserror::Error;

/// Errors produced by the vincular pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Input table malformed or too small for cross-channel inference
    #[error("invalid input table: {0}")]
    InvalidInput(String),

    /// Too few rows for a requested split or fold count
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Hyperparameter search could not fit any candidate configuration
    #[error("hyperparameter search exhausted: no candidate configuration could be fit")]
    SearchExhausted {
        #[source]
        source: Box<Error>,
    },

    /// Score recorded for a channel outside the fixed column universe
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    /// Invalid engine, split, or booster configuration
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dataset contains no frames or no numeric channels
    #[error("empty dataset: {0}")]
    EmptyDataset(String),

    /// Satellite not present in the registry
    #[error("no satellite matching '{0}'")]
    NoSuchSatellite(String),

    /// Satellite known but has no normalizer table
    #[error("no normalizer registered for satellite '{0}'")]
    NoNormalizer(String),

    /// Tool configuration file invalid
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("only 1 column".to_string());
        assert!(err.to_string().contains("invalid input table"));

        let err = Error::InsufficientData(
            "4 rows cannot fill both partitions at held-out fraction 0.2".to_string(),
        );
        assert!(err.to_string().contains("4 rows"));

        let err = Error::UnknownChannel("bat0_volt".to_string());
        assert!(err.to_string().contains("bat0_volt"));

        let err = Error::NoSuchSatellite("ACRUX-9".to_string());
        assert!(err.to_string().contains("ACRUX-9"));
    }

    #[test]
    fn test_search_exhausted_carries_source() {
        let source = Box::new(Error::InsufficientData(
            "5 rows cannot be split into 18 folds".to_string(),
        ));
        let err = Error::SearchExhausted { source };
        let chain = std::error::Error::source(&err).expect("source should be set");
        assert!(chain.to_string().contains("5 rows"));
    }
}
