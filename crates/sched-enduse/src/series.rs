//! `MinuteSeries`: a year-long, minute-resolution accumulation buffer.

use sched_core::MINUTES_PER_SLOT;

/// Raw per-minute values for one end use.
///
/// Event writes are additive so concurrent draws from different occupants
/// accumulate; presence-style writes overwrite.  Every write is clipped to
/// the end of the year.
#[derive(Clone, Debug, PartialEq)]
pub struct MinuteSeries {
    values: Vec<f64>,
}

impl MinuteSeries {
    pub fn zeros(minutes: usize) -> Self {
        Self { values: vec![0.0; minutes] }
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Add `value` to `len` minutes starting at `start`.
    pub fn add(&mut self, start: usize, len: usize, value: f64) {
        let end = start.saturating_add(len).min(self.values.len());
        if start >= end {
            return;
        }
        self.values[start..end].iter_mut().for_each(|v| *v += value);
    }

    /// Write one sub-event of `duration` minutes at `start`, never past `limit`.
    ///
    /// The duration is rounded up to whole minutes and `magnitude` scaled by
    /// `duration / ceil(duration)` so the event's volume is unchanged.
    /// Returns the whole minutes the event occupies (at least 1), including
    /// any part clipped at `limit`.
    pub fn add_event(&mut self, start: usize, duration: f64, magnitude: f64, limit: usize) -> usize {
        let minutes = duration.ceil().max(1.0);
        let value = magnitude * duration.max(0.0) / minutes;
        let minutes = minutes as usize;
        let end = (start + minutes).min(limit);
        if end > start {
            self.add(start, end - start, value);
        }
        minutes
    }

    /// Add `other` minute by minute (up to the shorter length).
    pub fn add_series(&mut self, other: &MinuteSeries) {
        self.values.iter_mut().zip(&other.values).for_each(|(v, o)| *v += o);
    }

    /// Overwrite the 15 minutes of `slot` with `value`.
    pub fn fill_slot(&mut self, slot: usize, value: f64) {
        let start = slot * MINUTES_PER_SLOT;
        let end = (start + MINUTES_PER_SLOT).min(self.values.len());
        if start < end {
            self.values[start..end].fill(value);
        }
    }

    #[inline]
    pub fn set(&mut self, minute: usize, value: f64) {
        self.values[minute] = value;
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}
