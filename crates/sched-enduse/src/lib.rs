//! `sched-enduse`: turns simulated occupant activity into per-minute draws.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`series`]     | `MinuteSeries`: year-long per-minute buffer                |
//! | [`context`]    | `SynthContext`: read-only tables, calendar, household      |
//! | [`constants`]  | `EndUseConstants` and its per-family parts                  |
//! | [`hygiene`]    | Sink, shower and bath water draws                           |
//! | [`appliance`]  | Dishwasher/washer water, appliance power, dryer chaining    |
//! | [`presence`]   | Occupancy, sleeping, lighting, plug loads, ceiling fan      |
//! | [`lighting`]   | Sunrise/sunset and the monthly lighting profile             |
//! | [`ev`]         | Driver choice, driving allocation, charge/discharge         |
//! | [`error`]      | `EndUseError`, `EndUseResult<T>`                            |
//!
//! # Ordering
//!
//! Synthesizers run only after every occupant's year is simulated.  Each
//! takes the [`SynthContext`] and, when it draws randomness, its own
//! family's `StreamRng`; none shares an output buffer with another.
//!
//! # Cargo features
//!
//! | Feature | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `EndUseConstants` (partial files) |

pub mod appliance;
pub mod constants;
pub mod context;
pub mod error;
pub mod ev;
pub mod hygiene;
pub mod lighting;
pub mod presence;
pub mod series;


pub use appliance::{Cycle, PowerDraw};
pub use constants::{
    DurationMultipliers, EndUseConstants, FlowDraw, LoadCurve, ShowerConstants, SinkConstants,
};
pub use context::SynthContext;
pub use error::{EndUseError, EndUseResult};
pub use ev::{EvSchedule, Run};
pub use lighting::{LightingProfile, SunTimes, sun_times};
pub use series::MinuteSeries;
