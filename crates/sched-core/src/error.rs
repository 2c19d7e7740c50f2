//! Core error type.
//!
//! Sub-crates define their own error enums and convert `CoreError` into
//! them via `From` impls.

use thiserror::Error;

/// The error type for `sched-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("calendar year {0} is out of range")]
    InvalidYear(i32),
}

/// Shorthand result type for `sched-core`.
pub type CoreResult<T> = Result<T, CoreError>;
