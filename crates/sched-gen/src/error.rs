use sched_core::CoreError;
use sched_enduse::EndUseError;
use sched_tables::TablesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error(transparent)]
    Tables(#[from] TablesError),

    #[error(transparent)]
    Constants(#[from] EndUseError),

    #[error("unknown output column {name:?}; valid columns are: {valid}")]
    UnknownColumn { name: String, valid: String },

    #[error("column {column} {reason}")]
    UnavailableColumn { column: &'static str, reason: &'static str },

    #[error("no monthly shifts for region {region:?}; known regions are: {known}")]
    UnknownRegion { region: String, known: String },
}

pub type GenResult<T> = Result<T, GenError>;
