//! Simulation calendar.
//!
//! # Design
//!
//! The generator works on three nested resolutions of one calendar year:
//!
//! ```text
//! day    (0 .. days)                 365 or 366
//! slot   (0 .. days * 96)            15-minute Markov steps
//! minute (0 .. days * 1440)          raw end-use series
//! ```
//!
//! `Calendar` precomputes the month of every day and the weekday of Jan 1 so
//! that day-type and month lookups inside the hot loops are O(1) array reads.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::{CoreError, CoreResult};

/// Fifteen-minute Markov slots per day.
pub const SLOTS_PER_DAY: usize = 96;
/// Minutes covered by one Markov slot.
pub const MINUTES_PER_SLOT: usize = 15;
/// Markov slots per hour.
pub const SLOTS_PER_HOUR: usize = 4;
pub const MINUTES_PER_DAY: usize = 1_440;

// ── DayType ───────────────────────────────────────────────────────────────────

/// Weekday/weekend classification used to select probability tables.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub const ALL: [DayType; 2] = [DayType::Weekday, DayType::Weekend];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Weekend => "weekend",
        }
    }

    /// Parse `"weekday"` / `"weekend"` (case-insensitive).
    pub fn parse(s: &str) -> Option<DayType> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekday" => Some(DayType::Weekday),
            "weekend" => Some(DayType::Weekend),
            _ => None,
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Calendar ──────────────────────────────────────────────────────────────────

/// One simulated calendar year.
#[derive(Clone, Debug)]
pub struct Calendar {
    year:            i32,
    /// Weekday of Jan 1, Monday = 0 … Sunday = 6.
    first_weekday:   u32,
    /// Zero-based month of every day of the year.
    month_of_day:    Vec<u8>,
    days_in_month:   [usize; 12],
}

impl Calendar {
    /// Build the calendar for `year` (365 or 366 days).
    pub fn new(year: i32) -> CoreResult<Self> {
        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CoreError::InvalidYear(year))?;
        let dec31 = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(CoreError::InvalidYear(year))?;
        let days = dec31.ordinal() as usize;

        let mut days_in_month = [0usize; 12];
        let month_of_day: Vec<u8> = jan1
            .iter_days()
            .take(days)
            .map(|d| {
                let m = d.month0() as usize;
                days_in_month[m] += 1;
                m as u8
            })
            .collect();

        Ok(Self {
            year,
            first_weekday: jan1.weekday().num_days_from_monday(),
            month_of_day,
            days_in_month,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Number of days in the year (365 or 366).
    #[inline]
    pub fn days(&self) -> usize {
        self.month_of_day.len()
    }

    /// Number of 15-minute slots in the year.
    #[inline]
    pub fn slots(&self) -> usize {
        self.days() * SLOTS_PER_DAY
    }

    /// Number of minutes in the year.
    #[inline]
    pub fn minutes(&self) -> usize {
        self.days() * MINUTES_PER_DAY
    }

    /// Weekend iff the day falls on a Saturday or Sunday.
    #[inline]
    pub fn day_type(&self, day: usize) -> DayType {
        match (self.first_weekday as usize + day) % 7 {
            5 | 6 => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }

    /// Zero-based month of `day`.
    #[inline]
    pub fn month(&self, day: usize) -> usize {
        self.month_of_day[day] as usize
    }

    /// Zero-based month of a year-relative 15-minute slot.
    #[inline]
    pub fn month_of_slot(&self, slot: usize) -> usize {
        self.month(slot / SLOTS_PER_DAY)
    }

    #[inline]
    pub fn days_in_month(&self, month: usize) -> usize {
        self.days_in_month[month]
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} days)", self.year, self.days())
    }
}
