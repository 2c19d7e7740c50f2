//! Unit tests for sched-markov.

use sched_core::{Calendar, OccupantId, RngStreams, SLOTS_PER_DAY, Stream};
use sched_tables::{ActivityState, OccupancyType, ProbabilityTables, scripted_tables, synthetic_tables};

use crate::{ActivityMatrix, DAY_START_OFFSET_SLOTS, Household, MarkovSimulator};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn calendar() -> Calendar {
    Calendar::new(2007).unwrap()
}

/// Away for the first 32 table slots (04:00–12:00), idle for the rest.
fn away_mornings() -> ProbabilityTables {
    scripted_tables(|_, _, j| if j < 32 { ActivityState::Absent } else { ActivityState::Idle })
        .unwrap()
}

fn matrix(states: &[ActivityState]) -> ActivityMatrix {
    ActivityMatrix::new(OccupancyType::new(0).unwrap(), states.to_vec())
}

fn day_of(state: ActivityState) -> Vec<ActivityState> {
    vec![state; SLOTS_PER_DAY]
}

// ── Simulator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod simulator {
    use super::*;

    #[test]
    fn covers_every_slot_of_the_year() {
        let tables = synthetic_tables().unwrap();
        let cal = calendar();
        let sim = MarkovSimulator::new(&tables, &cal);
        let mut streams = RngStreams::new(Some(1));
        let m = sim.simulate_occupant(streams.get_mut(Stream::Main));
        assert_eq!(m.len(), 365 * SLOTS_PER_DAY);
        assert_eq!(m.days(), 365);
        let total: usize = ActivityState::ALL.iter().map(|&s| m.count(s)).sum();
        assert_eq!(total, m.len());
    }

    #[test]
    fn same_seed_same_household() {
        let tables = synthetic_tables().unwrap();
        let cal = calendar();
        let sim = MarkovSimulator::new(&tables, &cal);
        let a = sim.simulate_household(3, &mut RngStreams::new(Some(7)), |_, _| {});
        let b = sim.simulate_household(3, &mut RngStreams::new(Some(7)), |_, _| {});
        assert_eq!(a.occupants(), b.occupants());
    }

    #[test]
    fn different_seeds_differ() {
        let tables = synthetic_tables().unwrap();
        let cal = calendar();
        let sim = MarkovSimulator::new(&tables, &cal);
        let a = sim.simulate_household(1, &mut RngStreams::new(Some(1)), |_, _| {});
        let b = sim.simulate_household(1, &mut RngStreams::new(Some(2)), |_, _| {});
        assert_ne!(a.occupants(), b.occupants());
    }

    #[test]
    fn scripted_day_is_rotated_to_midnight() {
        let tables = away_mornings();
        let cal = calendar();
        let sim = MarkovSimulator::new(&tables, &cal);
        let mut streams = RngStreams::new(Some(3));
        let m = sim.simulate_occupant(streams.get_mut(Stream::Main));

        // Table slot j lands on output slot j + 16.
        for day in [0, 100, 364] {
            let base = day * SLOTS_PER_DAY;
            for j in 0..SLOTS_PER_DAY {
                let expected = if (DAY_START_OFFSET_SLOTS..DAY_START_OFFSET_SLOTS + 32).contains(&j) {
                    ActivityState::Absent
                } else {
                    ActivityState::Idle
                };
                assert_eq!(m.state(base + j), expected, "day {day} slot {j}");
            }
        }
        approx::assert_relative_eq!(m.away_hours(), 365.0 * 8.0);
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn sequential_household_uses_main_stream_in_order() {
        let tables = synthetic_tables().unwrap();
        let cal = calendar();
        let sim = MarkovSimulator::new(&tables, &cal);
        let h = sim.simulate_household(2, &mut RngStreams::new(Some(21)), |_, _| {});

        let mut streams = RngStreams::new(Some(21));
        let main = streams.get_mut(Stream::Main);
        let first = sim.simulate_occupant(main);
        let second = sim.simulate_occupant(main);
        assert_eq!(h.occupants(), &[first, second]);
    }

    #[test]
    fn observer_sees_each_occupant_in_order() {
        let tables = synthetic_tables().unwrap();
        let cal = calendar();
        let sim = MarkovSimulator::new(&tables, &cal);
        let mut seen = Vec::new();
        let h = sim.simulate_household(4, &mut RngStreams::new(Some(5)), |id, m| {
            seen.push((id, m.len()));
        });
        assert_eq!(h.len(), 4);
        let ids: Vec<OccupantId> = seen.iter().map(|&(id, _)| id).collect();
        assert_eq!(ids, vec![OccupantId(0), OccupantId(1), OccupantId(2), OccupantId(3)]);
        assert!(seen.iter().all(|&(_, len)| len == cal.slots()));
    }

    #[test]
    fn zero_occupants_is_empty_household() {
        let tables = synthetic_tables().unwrap();
        let cal = calendar();
        let sim = MarkovSimulator::new(&tables, &cal);
        let h = sim.simulate_household(0, &mut RngStreams::new(Some(5)), |_, _| {});
        assert!(h.is_empty());
        assert_eq!(h.slots(), 0);
    }
}

// ── ActivityMatrix ────────────────────────────────────────────────────────────

#[cfg(test)]
mod activity_matrix {
    use super::*;

    #[test]
    fn one_hot_marks_exactly_one_state() {
        let m = matrix(&day_of(ActivityState::Laundry));
        let row = m.one_hot(5);
        assert_eq!(row.iter().map(|&v| v as usize).sum::<usize>(), 1);
        assert_eq!(row[ActivityState::Laundry.index()], 1);
    }

    #[test]
    fn table_alignment_rotates_right() {
        let mut states = day_of(ActivityState::Idle);
        states[0] = ActivityState::Shower;
        states[SLOTS_PER_DAY - 1] = ActivityState::Sleeping;
        let m = ActivityMatrix::from_table_aligned(OccupancyType::new(1).unwrap(), states);
        assert_eq!(m.state(DAY_START_OFFSET_SLOTS), ActivityState::Shower);
        assert_eq!(m.state(DAY_START_OFFSET_SLOTS - 1), ActivityState::Sleeping);
    }
}

// ── Household aggregates ──────────────────────────────────────────────────────

#[cfg(test)]
mod household {
    use super::*;

    fn two_person() -> Household {
        let mut a = day_of(ActivityState::Sleeping);
        let mut b = day_of(ActivityState::Absent);
        a[10] = ActivityState::Cooking;
        b[10] = ActivityState::Sleeping;
        a[20] = ActivityState::Idle;
        b[20] = ActivityState::Idle;
        Household::new(vec![matrix(&a), matrix(&b)])
    }

    #[test]
    fn counts_and_fractions() {
        let h = two_person();
        assert_eq!(h.count_in_state(0, ActivityState::Sleeping), 1);
        approx::assert_relative_eq!(h.fraction_in_state(0, ActivityState::Absent), 0.5);
        approx::assert_relative_eq!(h.fraction_in_state(20, ActivityState::Idle), 1.0);
    }

    #[test]
    fn active_fraction_excludes_asleep_and_away() {
        let h = two_person();
        approx::assert_relative_eq!(h.active_fraction(0), 0.0);
        approx::assert_relative_eq!(h.active_fraction(10), 0.5);
        approx::assert_relative_eq!(h.active_fraction(20), 1.0);
    }

    #[test]
    fn awake_presence() {
        let h = two_person();
        assert!(!h.any_awake_present(0));
        assert!(h.any_awake_present(10));
    }

    #[test]
    fn away_hours_per_occupant() {
        let h = two_person();
        let hours = h.away_hours();
        approx::assert_relative_eq!(hours[0], 0.0);
        approx::assert_relative_eq!(hours[1], 94.0 * 0.25);
    }

    #[test]
    fn empty_household_fractions_are_zero() {
        let h = Household::default();
        assert_eq!(h.fraction_in_state(0, ActivityState::Idle), 0.0);
        assert_eq!(h.active_fraction(0), 0.0);
    }
}
