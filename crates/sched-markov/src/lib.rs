//! `sched-markov`: per-occupant activity simulation.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`matrix`]     | `ActivityMatrix`: one occupant's year of 15-minute states |
//! | [`simulator`]  | `MarkovSimulator` (day-by-day chain over the table store)  |
//! | [`household`]  | `Household`: per-slot counts and fractions across occupants |
//!
//! # Simulation loop
//!
//! ```text
//! occupancy type ← sample(OccupancyType::WEIGHTS)
//! for day in calendar order:
//!   probs ← initial[type][day_type]
//!   j ← 0
//!   while j < 96:
//!     state ← sample(probs)
//!     dur   ← duration table (shower/laundry/cooking/dishwashing) or 1
//!     fill slots j..min(j+dur, 96) with state
//!     j     ← j + dur
//!     probs ← transition[type][day_type][j][state]
//! rotate the year right by 16 slots (04:00-based tables → midnight)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Occupants run on Rayon's thread pool with `OccupantRng`s.   |

pub mod household;
pub mod matrix;
pub mod simulator;

#[cfg(test)]
mod tests;

pub use household::Household;
pub use matrix::{ActivityMatrix, DAY_START_OFFSET_SLOTS};
pub use simulator::MarkovSimulator;
