//! Error Types
//!
//! A single error enum covers phase sequencing mistakes, output failures and
//! configuration problems.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by metrics sessions, the registry and configuration loading.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// `end_collection` was called with no collection in progress.
    #[error("experience collection for '{0}' was never started")]
    CollectionNotStarted(String),

    /// `end_update` was called with no policy update in progress.
    #[error("policy update for '{0}' was never started")]
    UpdateNotStarted(String),

    #[error("failed to write metrics to '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode metrics for '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("brain '{0}' is already registered")]
    DuplicateBrain(String),

    #[error("no metrics session for brain '{0}'")]
    UnknownBrain(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MetricsError>;
