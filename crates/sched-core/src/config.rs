//! Building description consumed by the generator.
//!
//! Typically loaded from a TOML file by the application crate and passed to
//! the generator builder.  With the `serde` feature every struct deserializes
//! with `#[serde(default)]`, so a file only needs the fields it changes.

use crate::{CoreError, CoreResult, MINUTES_PER_DAY};

// ── Location ──────────────────────────────────────────────────────────────────

/// Site location used for sunrise/sunset and monthly-shift lookups.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Location {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east (negative for the western hemisphere).
    pub longitude: f64,
    /// Standard-time offset from UTC in hours (e.g. -7 for Mountain).
    pub utc_offset_hours: f64,
    /// Region key of the monthly-shift table (a state code such as `"CO"`).
    pub region: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            latitude:         39.74,
            longitude:        -104.99,
            utc_offset_hours: -7.0,
            region:           "CO".to_string(),
        }
    }
}

// ── Appliances ────────────────────────────────────────────────────────────────

/// Which end-use devices the building has.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Appliances {
    pub dishwasher:       bool,
    pub clothes_washer:   bool,
    pub clothes_dryer:    bool,
    pub cooking_range:    bool,
    pub ceiling_fan:      bool,
    pub plug_loads_tv:    bool,
    pub plug_loads_other: bool,
}

impl Default for Appliances {
    fn default() -> Self {
        Self {
            dishwasher:       true,
            clothes_washer:   true,
            clothes_dryer:    true,
            cooking_range:    true,
            ceiling_fan:      true,
            plug_loads_tv:    true,
            plug_loads_other: true,
        }
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// An electric vehicle and how much it is driven.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Vehicle {
    /// Average driving hours per week.
    pub hours_per_week: f64,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self { hours_per_week: 5.14 }
    }
}

impl Vehicle {
    /// Required driving hours over a year of `days` days.
    pub fn annual_driving_hours(&self, days: usize) -> f64 {
        self.hours_per_week * days as f64 / 7.0
    }
}

// ── ScheduleConfig ────────────────────────────────────────────────────────────

/// Top-level generation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScheduleConfig {
    /// Occupant count.  May be fractional; truncated for simulation.
    pub occupants: f64,

    /// Calendar year; determines 365 vs. 366 days and day-of-week alignment.
    pub year: i32,

    /// Output timestep in minutes.  Must evenly divide 1440.
    pub timestep_minutes: u32,

    /// Master seed.  `None` draws a seed from OS entropy (logged).
    pub seed: Option<u64>,

    /// Adds the debug-only `sleeping` / `ev_occupant_presence` columns.
    pub debug: bool,

    pub location: Location,

    pub appliances: Appliances,

    /// Electric vehicle, if the building has one.
    pub vehicle: Option<Vehicle>,

    /// Months in which ceiling fans operate (derived from weather upstream).
    pub ceiling_fan_months: [bool; 12],
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            occupants:          3.0,
            year:               2007,
            timestep_minutes:   60,
            seed:               None,
            debug:              false,
            location:           Location::default(),
            appliances:         Appliances::default(),
            vehicle:            None,
            ceiling_fan_months: [
                false, false, false, false, true, true, true, true, true, false, false, false,
            ],
        }
    }
}

impl ScheduleConfig {
    /// Number of occupants actually simulated (fraction truncated).
    pub fn occupant_count(&self) -> usize {
        self.occupants.max(0.0).trunc() as usize
    }

    /// Occupant count as reported in logs (rounded).
    pub fn reported_occupants(&self) -> u32 {
        self.occupants.max(0.0).round() as u32
    }

    /// Number of output rows per day at this timestep.
    pub fn steps_per_day(&self) -> usize {
        MINUTES_PER_DAY / self.timestep_minutes.max(1) as usize
    }

    /// Check scalar fields; table-dependent checks happen in the builder.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.occupants.is_finite() || self.occupants < 0.0 {
            return Err(CoreError::Config(format!(
                "occupants must be a non-negative number, got {}",
                self.occupants
            )));
        }
        let ts = self.timestep_minutes as usize;
        if ts == 0 || MINUTES_PER_DAY % ts != 0 {
            return Err(CoreError::Config(format!(
                "timestep_minutes must evenly divide {MINUTES_PER_DAY}, got {ts}"
            )));
        }
        if !(-90.0..=90.0).contains(&self.location.latitude) {
            return Err(CoreError::Config(format!(
                "latitude {} is outside [-90, 90]",
                self.location.latitude
            )));
        }
        if let Some(v) = &self.vehicle {
            if !v.hours_per_week.is_finite() || v.hours_per_week < 0.0 {
                return Err(CoreError::Config(format!(
                    "vehicle hours_per_week must be non-negative, got {}",
                    v.hours_per_week
                )));
            }
        }
        Ok(())
    }
}
