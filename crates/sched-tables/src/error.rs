use thiserror::Error;

#[derive(Debug, Error)]
pub enum TablesError {
    #[error("table parse error: {0}")]
    Parse(String),

    #[error("missing table entry: {0}")]
    Missing(String),

    #[error("malformed {what}: {reason}")]
    Malformed { what: String, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TablesResult<T> = Result<T, TablesError>;
