//! `Household`: all occupants' matrices plus per-slot aggregates.

use sched_core::OccupantId;
use sched_tables::ActivityState;

use crate::ActivityMatrix;

/// Every occupant's simulated year.  All matrices have the same length.
#[derive(Clone, Debug, Default)]
pub struct Household {
    occupants: Vec<ActivityMatrix>,
}

impl Household {
    pub fn new(occupants: Vec<ActivityMatrix>) -> Self {
        debug_assert!(
            occupants.windows(2).all(|w| w[0].len() == w[1].len()),
            "occupant matrices differ in length"
        );
        Self { occupants }
    }

    /// Number of occupants.
    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Slots per occupant (0 for an empty household).
    pub fn slots(&self) -> usize {
        self.occupants.first().map_or(0, ActivityMatrix::len)
    }

    pub fn occupants(&self) -> &[ActivityMatrix] {
        &self.occupants
    }

    #[inline]
    pub fn occupant(&self, id: OccupantId) -> &ActivityMatrix {
        &self.occupants[id.index()]
    }

    /// Occupants in `state` during `slot`.
    #[inline]
    pub fn count_in_state(&self, slot: usize, state: ActivityState) -> usize {
        self.occupants.iter().filter(|m| m.is(slot, state)).count()
    }

    /// Share of occupants in `state` during `slot` (0 for an empty household).
    #[inline]
    pub fn fraction_in_state(&self, slot: usize, state: ActivityState) -> f64 {
        if self.occupants.is_empty() {
            return 0.0;
        }
        self.count_in_state(slot, state) as f64 / self.occupants.len() as f64
    }

    /// Share of occupants at home and awake: `1 − away − asleep`.
    pub fn active_fraction(&self, slot: usize) -> f64 {
        if self.occupants.is_empty() {
            return 0.0;
        }
        1.0 - self.fraction_in_state(slot, ActivityState::Absent)
            - self.fraction_in_state(slot, ActivityState::Sleeping)
    }

    /// At least one occupant is neither asleep nor away.
    pub fn any_awake_present(&self, slot: usize) -> bool {
        self.occupants.iter().any(|m| {
            let s = m.state(slot);
            s != ActivityState::Sleeping && s != ActivityState::Absent
        })
    }

    /// Annual away hours per occupant.
    pub fn away_hours(&self) -> Vec<f64> {
        self.occupants.iter().map(ActivityMatrix::away_hours).collect()
    }
}
