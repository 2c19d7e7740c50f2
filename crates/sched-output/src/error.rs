//! Error types for sched-output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when writing schedules.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Append target does not have one row per timestep plus a header.
    #[error("cannot append to {}: it has {actual} rows, expected {expected}", path.display())]
    RowCountMismatch { path: PathBuf, expected: usize, actual: usize },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
