//! Error types for pingport.
//!
//! Uses `thiserror` for ergonomic error definitions. Probe-level failures
//! (timeouts, refused connections) are not errors here; they are outcomes.
//! This module only covers failures that abort a run.

use crate::types::PortError;
use std::path::PathBuf;
use thiserror::Error;

/// Process-level error type.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("no input files supplied")]
    MissingInput,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid row in {path}: {source}")]
    InvalidRow {
        path: PathBuf,
        #[source]
        source: PortError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
