//! Read-only run state passed to every synthesizer.

use sched_core::{Calendar, MINUTES_PER_SLOT};
use sched_markov::Household;
use sched_tables::ProbabilityTables;

use crate::EndUseConstants;

/// A read-only snapshot shared by every synthesizer of one run.
///
/// Built once, after the Markov phase has finished for all occupants; the
/// synthesizers only read through it and each owns its output buffer.
#[derive(Clone, Copy)]
pub struct SynthContext<'a> {
    pub tables:    &'a ProbabilityTables,
    pub calendar:  &'a Calendar,
    /// Every occupant's simulated year.
    pub household: &'a Household,
    pub constants: &'a EndUseConstants,
}

impl<'a> SynthContext<'a> {
    #[inline]
    pub fn new(
        tables:    &'a ProbabilityTables,
        calendar:  &'a Calendar,
        household: &'a Household,
        constants: &'a EndUseConstants,
    ) -> Self {
        Self { tables, calendar, household, constants }
    }

    /// Minutes in the simulated year.
    #[inline]
    pub fn minutes(&self) -> usize {
        self.calendar.minutes()
    }

    /// 15-minute slots in the simulated year.
    #[inline]
    pub fn slots(&self) -> usize {
        self.calendar.slots()
    }

    /// First minute of `slot`.
    #[inline]
    pub fn slot_start(slot: usize) -> usize {
        slot * MINUTES_PER_SLOT
    }
}
