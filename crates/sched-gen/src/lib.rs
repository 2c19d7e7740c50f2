//! `sched-gen`: runs a whole household year, from occupants to columns.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`column`]      | `Column`: supported output names and device requirements  |
//! | [`builder`]     | `GeneratorBuilder` (validation)                            |
//! | [`generator`]   | `ScheduleGenerator::generate`                              |
//! | [`postprocess`] | Offset, monthly shift, aggregation, normalization          |
//! | [`observer`]    | `GenerationObserver`, `NoopObserver`                       |
//! | [`set`]         | `Outcome`, `ScheduleSet`, `RunReport`                      |
//! | [`error`]       | `GenError`, `GenResult<T>`                                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sched_gen::{GeneratorBuilder, NoopObserver, Outcome};
//!
//! let tables = sched_tables::synthetic_tables()?;
//! let generator = GeneratorBuilder::new(config, &tables).build()?;
//! match generator.generate(&mut NoopObserver)? {
//!     Outcome::Generated(set) => println!("{} columns", set.columns().len()),
//!     Outcome::NoOccupants => println!("nothing to do"),
//! }
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Occupants simulated on Rayon's pool (per-occupant RNGs). |
//! | `serde`    | Serde derives on `ScheduleConfig` and `EndUseConstants`. |

pub mod builder;
pub mod column;
pub mod error;
pub mod generator;
pub mod observer;
pub mod postprocess;
pub mod set;

#[cfg(test)]
mod tests;

pub use builder::GeneratorBuilder;
pub use column::Column;
pub use error::{GenError, GenResult};
pub use generator::ScheduleGenerator;
pub use observer::{GenerationObserver, NoopObserver};
pub use postprocess::PostProcessor;
pub use set::{Outcome, RunReport, ScheduleSet};
