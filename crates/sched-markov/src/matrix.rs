//! `ActivityMatrix`: one occupant's simulated year.

use sched_core::{MINUTES_PER_SLOT, SLOTS_PER_DAY};
use sched_tables::{ActivityState, OccupancyType};

/// Slots between the tables' 04:00 day start and midnight.
pub const DAY_START_OFFSET_SLOTS: usize = 16;

/// The active state of one occupant for every 15-minute slot of the year.
///
/// Stored compactly as one `ActivityState` per slot; the one-hot view is
/// derived on demand.  Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityMatrix {
    occupancy_type: OccupancyType,
    states:         Vec<ActivityState>,
}

impl ActivityMatrix {
    /// Wrap a midnight-aligned state sequence.
    pub fn new(occupancy_type: OccupancyType, states: Vec<ActivityState>) -> Self {
        debug_assert!(states.len() % SLOTS_PER_DAY == 0, "partial day in activity matrix");
        Self { occupancy_type, states }
    }

    /// Wrap a sequence in the tables' 04:00 alignment, rotating it to midnight.
    pub(crate) fn from_table_aligned(
        occupancy_type: OccupancyType,
        mut states:     Vec<ActivityState>,
    ) -> Self {
        let shift = DAY_START_OFFSET_SLOTS.min(states.len());
        states.rotate_right(shift);
        Self::new(occupancy_type, states)
    }

    pub fn occupancy_type(&self) -> OccupancyType {
        self.occupancy_type
    }

    /// Number of 15-minute slots.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn days(&self) -> usize {
        self.states.len() / SLOTS_PER_DAY
    }

    #[inline]
    pub fn state(&self, slot: usize) -> ActivityState {
        self.states[slot]
    }

    #[inline]
    pub fn is(&self, slot: usize, state: ActivityState) -> bool {
        self.states[slot] == state
    }

    pub fn states(&self) -> &[ActivityState] {
        &self.states
    }

    /// One-hot row for `slot`, indexed by state id.
    pub fn one_hot(&self, slot: usize) -> [u8; ActivityState::COUNT] {
        let mut row = [0u8; ActivityState::COUNT];
        row[self.states[slot].index()] = 1;
        row
    }

    /// Slots spent in `state` over the year.
    pub fn count(&self, state: ActivityState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }

    /// Annual hours spent away from home.
    pub fn away_hours(&self) -> f64 {
        (self.count(ActivityState::Absent) * MINUTES_PER_SLOT) as f64 / 60.0
    }
}
