//! Generation observer trait for progress reporting.

use sched_core::OccupantId;
use sched_markov::ActivityMatrix;

use crate::{Column, RunReport};

/// Callbacks invoked by [`ScheduleGenerator::generate`][crate::ScheduleGenerator::generate].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: column counter
///
/// ```rust,ignore
/// struct Counter(usize);
///
/// impl GenerationObserver for Counter {
///     fn on_column(&mut self, _c: Column, _v: &[f64]) { self.0 += 1; }
/// }
/// ```
pub trait GenerationObserver {
    /// Called once per occupant, in id order, after the Markov phase.
    fn on_occupant(&mut self, _id: OccupantId, _matrix: &ActivityMatrix) {}

    /// Called after each requested column is post-processed.
    fn on_column(&mut self, _column: Column, _values: &[f64]) {}

    /// Called for each soft condition (also logged as a warning).
    fn on_warning(&mut self, _message: &str) {}

    /// Called once when a run with occupants completes.
    fn on_run_end(&mut self, _report: &RunReport) {}
}

/// A [`GenerationObserver`] that does nothing.
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {}
