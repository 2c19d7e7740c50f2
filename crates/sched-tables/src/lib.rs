//! `sched-tables`: the probability table store.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`activity`]  | `ActivityState`, `OccupancyType`, `TimeOfDay`, `EventFamily`, `Appliance` |
//! | [`tables`]    | `ProbabilityTables`, `Weights`, `Distribution`, `ApplianceProfile` |
//! | [`builder`]   | `TablesBuilder` (validating construction)                  |
//! | [`loader`]    | `load_tables_dir` and per-file `read_*` functions          |
//! | [`synthetic`] | `synthetic_tables`, `scripted_tables` (test and demo sets) |
//! | [`error`]     | `TablesError`, `TablesResult<T>`                           |
//!
//! # Lifetime
//!
//! Tables are loaded once per run, validated, and then passed by shared
//! reference to every component.  There is no global table state.

pub mod activity;
pub mod builder;
pub mod error;
pub mod loader;
pub mod synthetic;
pub mod tables;


pub use activity::{
    ActivityState, Appliance, DurationActivity, EventFamily, OccupancyType, STATE_INFO, StateInfo,
    TimeOfDay,
};
pub use builder::{PROBABILITY_TOLERANCE, TablesBuilder};
pub use error::{TablesError, TablesResult};
pub use loader::load_tables_dir;
pub use synthetic::{scripted_tables, synthetic_tables};
pub use tables::{ApplianceProfile, Distribution, MonthlyShifts, ProbabilityTables, Weights};
