//! `sched-output`: writers for generated schedules.
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`writer`]  | `ScheduleWriter` trait                            |
//! | [`csv`]     | `CsvScheduleWriter`, `WriteMode`, `format_sig3`   |
//! | [`error`]   | `OutputError`, `OutputResult<T>`                  |
//!
//! # Usage
//!
//! ```rust,ignore
//! use sched_output::{CsvScheduleWriter, ScheduleWriter, WriteMode};
//!
//! if let Outcome::Generated(set) = generator.generate(&mut NoopObserver)? {
//!     CsvScheduleWriter::new("schedules.csv", WriteMode::Create).write(&set)?;
//! }
//! ```

pub mod csv;
pub mod error;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::{CsvScheduleWriter, WriteMode, format_sig3};
pub use error::{OutputError, OutputResult};
pub use writer::ScheduleWriter;
