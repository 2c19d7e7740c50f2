use thiserror::Error;

#[derive(Debug, Error)]
pub enum EndUseError {
    #[error("invalid end-use constant {name}: {reason}")]
    InvalidConstant { name: &'static str, reason: String },
}

pub type EndUseResult<T> = Result<T, EndUseError>;
