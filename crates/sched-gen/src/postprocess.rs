//! Raw per-minute series → output column.
//!
//! ```text
//! ① rotate the whole year by the run's offset (±30 min)
//! ② rotate each day earlier by its (region, month, day type) lead time
//! ③ sum consecutive minutes into timestep blocks
//! ④ divide by max_val, or by the series' own maximum
//! ```
//!
//! Rotations follow [`roll`]: a positive amount moves values later.  A
//! positive lead time therefore rolls the day by its negation, so events
//! happen that many minutes earlier (wrapping within the day).
//!
//! Steps ①–③ are identical for every column of a run; only ④'s divisor
//! varies.  A zero divisor leaves the values unscaled.

use sched_core::{Calendar, MINUTES_PER_DAY, StreamRng, UniformSource};
use sched_tables::MonthlyShifts;

/// Draw the run-wide offset in minutes, `floor(u × 60) − 30`.
pub fn draw_offset(rng: &mut StreamRng) -> i64 {
    (rng.uniform() * 60.0).floor() as i64 - 30
}

/// Rotate `values` so the element at `i` moves to `i + by` (wrapping).
pub fn roll(values: &mut [f64], by: i64) {
    if values.is_empty() {
        return;
    }
    let k = by.rem_euclid(values.len() as i64) as usize;
    values.rotate_right(k);
}

/// Sum consecutive blocks of `step` values (a trailing partial block is summed too).
pub fn aggregate(values: &[f64], step: usize) -> Vec<f64> {
    values.chunks(step.max(1)).map(|c| c.iter().sum()).collect()
}

/// Divide by `max_val`, or by the largest value when `None`.
pub fn normalize(values: &mut [f64], max_val: Option<f64>) {
    let divisor = max_val.unwrap_or_else(|| values.iter().copied().fold(0.0, f64::max));
    if divisor > 0.0 {
        values.iter_mut().for_each(|v| *v /= divisor);
    }
}

/// The post-processing settings fixed for one run.
#[derive(Clone, Debug)]
pub struct PostProcessor<'a> {
    calendar: &'a Calendar,
    shifts:   MonthlyShifts,
    timestep: usize,
    offset:   i64,
}

impl<'a> PostProcessor<'a> {
    pub fn new(calendar: &'a Calendar, shifts: MonthlyShifts, timestep: usize, offset: i64) -> Self {
        Self { calendar, shifts, timestep, offset }
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Steps ① and ②.
    pub fn shift(&self, raw: &[f64]) -> Vec<f64> {
        let mut values = raw.to_vec();
        roll(&mut values, self.offset);

        for (day, block) in values.chunks_mut(MINUTES_PER_DAY).enumerate() {
            if day >= self.calendar.days() {
                break;
            }
            let month = self.calendar.month(day);
            let day_type = self.calendar.day_type(day);
            let lead = i64::from(self.shifts[month][day_type.index()]);
            roll(block, -lead);
        }
        values
    }

    /// All four steps.
    pub fn random_shift_and_normalize(&self, raw: &[f64], max_val: Option<f64>) -> Vec<f64> {
        let shifted = self.shift(raw);
        let mut out = aggregate(&shifted, self.timestep);
        normalize(&mut out, max_val);
        out
    }
}
