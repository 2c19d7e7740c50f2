//! `MarkovSimulator`: day-by-day activity chain for each occupant.

use sched_core::{Calendar, OccupantId, RngStreams, SLOTS_PER_DAY, SLOTS_PER_HOUR, UniformSource};
use sched_tables::{ActivityState, OccupancyType, ProbabilityTables, TimeOfDay};
use tracing::debug;

use crate::{ActivityMatrix, Household};

/// Simulates occupants against a shared, validated table store.
///
/// Holds only shared references; one simulator serves every occupant of a
/// run, and (with the `parallel` feature) every thread.
#[derive(Clone, Copy)]
pub struct MarkovSimulator<'a> {
    tables:   &'a ProbabilityTables,
    calendar: &'a Calendar,
}

impl<'a> MarkovSimulator<'a> {
    pub fn new(tables: &'a ProbabilityTables, calendar: &'a Calendar) -> Self {
        Self { tables, calendar }
    }

    /// Simulate one occupant's year.
    ///
    /// Draws, in order: the occupancy type, then per day a state and (for
    /// states with a duration table) a duration, repeated until the day's
    /// 96 slots are filled.
    pub fn simulate_occupant<R: UniformSource + ?Sized>(&self, rng: &mut R) -> ActivityMatrix {
        let occ = OccupancyType::sample(rng);
        let mut states = Vec::with_capacity(self.calendar.slots());

        for day in 0..self.calendar.days() {
            let day_type = self.calendar.day_type(day);
            let mut probs = self.tables.initial(occ, day_type);
            let mut j = 0;

            while j < SLOTS_PER_DAY {
                let state = ActivityState::ALL[probs.sample(rng)];
                let duration = match state.duration_activity() {
                    Some(act) => {
                        let tod = TimeOfDay::from_hour(j / SLOTS_PER_HOUR);
                        let slots = self.tables.activity_duration(occ, day_type, tod, act).sample(rng);
                        (slots as usize).max(1)
                    }
                    None => 1,
                };

                let end = (j + duration).min(SLOTS_PER_DAY);
                states.extend(std::iter::repeat_n(state, end - j));
                j = end;

                if j < SLOTS_PER_DAY {
                    probs = self.tables.transition(occ, day_type, j, state);
                }
            }
        }

        ActivityMatrix::from_table_aligned(occ, states)
    }

    /// Simulate `count` occupants.
    ///
    /// Sequentially, occupants draw from the `main` stream in id order, so a
    /// seed reproduces the run exactly.  With the `parallel` feature each
    /// occupant draws from its own `OccupantRng` derived from the root seed.
    /// `on_occupant` is called once per occupant, in id order.
    pub fn simulate_household<F>(
        &self,
        count:           usize,
        streams:         &mut RngStreams,
        mut on_occupant: F,
    ) -> Household
    where
        F: FnMut(OccupantId, &ActivityMatrix),
    {
        #[cfg(not(feature = "parallel"))]
        let occupants: Vec<ActivityMatrix> = {
            let rng = streams.get_mut(sched_core::Stream::Main);
            (0..count).map(|_| self.simulate_occupant(rng)).collect()
        };

        #[cfg(feature = "parallel")]
        let occupants: Vec<ActivityMatrix> = {
            use rayon::prelude::*;
            use sched_core::OccupantRng;

            let root = streams.seed();
            (0..count as u32)
                .into_par_iter()
                .map(|i| self.simulate_occupant(&mut OccupantRng::new(root, OccupantId(i))))
                .collect()
        };

        for (i, matrix) in occupants.iter().enumerate() {
            let id = OccupantId(i as u32);
            debug!(
                occupant = i,
                occupancy_type = %matrix.occupancy_type(),
                away_hours = matrix.away_hours(),
                "occupant simulated"
            );
            on_occupant(id, matrix);
        }

        Household::new(occupants)
    }
}
