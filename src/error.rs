//! Error types for the import pipeline.
//!
//! Two tiers exist: configuration errors abort the whole run, read errors are
//! scoped to one file and only abort the run when that file was the sole target.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// Missing or invalid setting. Not retryable until the configuration changes.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A CSV file could not be opened or decoded.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ImportError {
    pub fn config(msg: impl Into<String>) -> Self {
        ImportError::Configuration(msg.into())
    }

    pub fn read(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        ImportError::Read { path: path.into(), source }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, ImportError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
