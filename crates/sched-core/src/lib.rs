//! `sched-core`: foundational types for the household schedule generator.
//!
//! This crate is a dependency of every other `sched-*` crate.  It has no
//! `sched-*` dependencies and keeps external ones small (`rand`,
//! `rand_distr`, `chrono`, `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`ids`]        | `OccupantId`                                             |
//! | [`calendar`]   | `Calendar`, `DayType`, slot/minute constants             |
//! | [`rng`]        | `Stream`, `StreamRng`, `RngStreams`, `OccupantRng`       |
//! | [`sampler`]    | `precompute`, `sample`, `sample_cumulative`              |
//! | [`config`]     | `ScheduleConfig` (building description)                  |
//! | [`error`]      | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config types, with       |
//! |         | `#[serde(default)]` so partial files override defaults.    |

pub mod calendar;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod sampler;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use calendar::{
    Calendar, DayType, MINUTES_PER_DAY, MINUTES_PER_SLOT, SLOTS_PER_DAY, SLOTS_PER_HOUR,
};
pub use config::{Appliances, Location, ScheduleConfig, Vehicle};
pub use error::{CoreError, CoreResult};
pub use ids::OccupantId;
pub use rng::{OccupantRng, RngStreams, Stream, StreamRng, UniformSource};
pub use sampler::{precompute, sample, sample_cumulative};
