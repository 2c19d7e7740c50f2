//! Complete, valid table sets for tests and table-less demo runs.
//!
//! [`synthetic_tables`] is a plausible stochastic household.  Its Markov
//! rows come from an hour-of-day activity mix (night, morning, working day,
//! evening) with per-occupancy-type absence and extra weight on staying
//! asleep, away, or idle.  Every other table is a small hand-picked
//! distribution.  [`scripted_tables`] replaces the chain with a fixed
//! per-slot script so tests can pin occupants to known states.  Both pass
//! [`TablesBuilder::build`] validation; neither is calibrated against survey
//! data.

use sched_core::{DayType, SLOTS_PER_DAY, SLOTS_PER_HOUR};

use crate::activity::{
    ActivityState, Appliance, DurationActivity, EventFamily, OccupancyType, TimeOfDay,
};
use crate::{ProbabilityTables, TablesBuilder, TablesResult};

/// Clock hour of table slot 0.
const TABLE_START_HOUR: usize = 4;

/// Weight kept on the current state for sleeping, absent, and idle rows.
const PERSISTENCE: f64 = 0.7;

/// Absence multiplier per occupancy type.
const ABSENCE_FACTOR: [f64; OccupancyType::COUNT] = [1.2, 1.0, 0.6, 0.4];

/// Absence multiplier on weekends.
const WEEKEND_ABSENCE: f64 = 0.6;

// sleeping, shower, laundry, cooking, dishwashing, absent, idle
const NIGHT:   [f64; 7] = [0.85, 0.01, 0.005, 0.01, 0.015, 0.03, 0.08];
const MORNING: [f64; 7] = [0.25, 0.12, 0.03, 0.12, 0.05, 0.13, 0.30];
const DAYTIME: [f64; 7] = [0.03, 0.02, 0.06, 0.06, 0.05, 0.48, 0.30];
const EVENING: [f64; 7] = [0.08, 0.04, 0.05, 0.15, 0.08, 0.15, 0.45];

/// Build the synthetic table set with the `"CO"` and `"NATIONAL"` regions.
pub fn synthetic_tables() -> TablesResult<ProbabilityTables> {
    let mut b = TablesBuilder::new();

    for occ in OccupancyType::all() {
        for day in DayType::ALL {
            b.initial(occ, day, state_mix(occ, day, 0));

            for slot in 0..SLOTS_PER_DAY {
                let base = state_mix(occ, day, slot);
                for from in ActivityState::ALL {
                    b.transition(occ, day, slot, from, persist(&base, from));
                }
            }

            for tod in TimeOfDay::ALL {
                for act in DurationActivity::ALL {
                    let (durations, probs) = activity_durations(act);
                    b.activity_duration(occ, day, tod, act, durations, probs);
                }
            }
        }
    }

    fill_event_tables(&mut b);
    b.build()
}

/// Build a deterministic chain: at table slot `j` every occupant of type
/// `occ` on a `day` is in `script(occ, day, j)`, each activity lasting one
/// slot.  Event, appliance, and shift tables match [`synthetic_tables`].
pub fn scripted_tables<F>(script: F) -> TablesResult<ProbabilityTables>
where
    F: Fn(OccupancyType, DayType, usize) -> ActivityState,
{
    let mut b = TablesBuilder::new();

    for occ in OccupancyType::all() {
        for day in DayType::ALL {
            b.initial(occ, day, one_hot(script(occ, day, 0)));
            for slot in 0..SLOTS_PER_DAY {
                let row = one_hot(script(occ, day, slot));
                for from in ActivityState::ALL {
                    b.transition(occ, day, slot, from, row.clone());
                }
            }
            for tod in TimeOfDay::ALL {
                for act in DurationActivity::ALL {
                    b.activity_duration(occ, day, tod, act, vec![1.0], vec![1.0]);
                }
            }
        }
    }

    fill_event_tables(&mut b);
    b.build()
}

fn fill_event_tables(b: &mut TablesBuilder) {
    b.cluster_size(EventFamily::Sink, vec![0.30, 0.25, 0.20, 0.15, 0.10])
        .cluster_size(EventFamily::Shower, vec![0.85, 0.15])
        .cluster_size(EventFamily::ClothesWasher, vec![0.10, 0.20, 0.30, 0.25, 0.15])
        .cluster_size(EventFamily::Dishwasher, vec![0.20, 0.30, 0.30, 0.20]);

    b.event_duration(EventFamily::Sink, vec![0.5, 1.0, 2.0, 3.0], vec![0.40, 0.35, 0.15, 0.10])
        .event_duration(EventFamily::Shower, vec![5.0, 8.0, 10.0, 15.0], vec![0.20, 0.35, 0.30, 0.15])
        .event_duration(EventFamily::ClothesWasher, vec![1.0, 2.0, 3.0], vec![0.40, 0.40, 0.20])
        .event_duration(EventFamily::Dishwasher, vec![1.0, 2.0, 3.0], vec![0.30, 0.40, 0.30]);

    b.appliance_duration_row(Appliance::Dishwasher, vec![6.0, 7.0, 8.0])
        .appliance_duration_row(Appliance::Dishwasher, vec![5.0, 6.0])
        .appliance_power_row(Appliance::Dishwasher, vec![180.0, 220.0, 250.0])
        .appliance_power_row(Appliance::Dishwasher, vec![150.0, 200.0])
        .appliance_duration_row(Appliance::ClothesWasher, vec![3.0, 4.0])
        .appliance_duration_row(Appliance::ClothesWasher, vec![4.0, 5.0])
        .appliance_power_row(Appliance::ClothesWasher, vec![120.0, 150.0])
        .appliance_power_row(Appliance::ClothesWasher, vec![100.0, 130.0])
        .appliance_duration_row(Appliance::ClothesDryer, vec![4.0, 5.0, 6.0])
        .appliance_power_row(Appliance::ClothesDryer, vec![2200.0, 2500.0, 2800.0])
        .appliance_duration_row(Appliance::CookingRange, vec![1.0, 2.0])
        .appliance_duration_row(Appliance::CookingRange, vec![1.0, 2.0, 3.0])
        .appliance_power_row(Appliance::CookingRange, vec![1000.0, 1500.0, 2000.0]);

    // Lead time in minutes, [weekday, weekend] per month.
    let co: [[i32; 2]; 12] = [
        [0, 15], [0, 15], [-15, 0], [-15, 0], [-30, -15], [-45, -30],
        [-45, -30], [-30, -15], [-15, 0], [0, 15], [0, 15], [0, 15],
    ];
    let national: [[i32; 2]; 12] = [
        [0, 0], [0, 0], [0, 0], [-15, 0], [-15, -15], [-30, -15],
        [-30, -15], [-15, -15], [-15, 0], [0, 0], [0, 0], [0, 0],
    ];
    for (region, table) in [("CO", co), ("NATIONAL", national)] {
        for (month, days) in table.iter().enumerate() {
            for day in DayType::ALL {
                b.monthly_shift(region, month, day, days[day.index()]);
            }
        }
    }
}

fn one_hot(state: ActivityState) -> Vec<f64> {
    let mut row = vec![0.0; ActivityState::COUNT];
    row[state.index()] = 1.0;
    row
}

fn state_mix(occ: OccupancyType, day: DayType, slot: usize) -> Vec<f64> {
    let hour = (slot / SLOTS_PER_HOUR + TABLE_START_HOUR) % 24;
    let base = match hour {
        6..=8 => MORNING,
        9..=16 => DAYTIME,
        17..=22 => EVENING,
        _ => NIGHT,
    };
    let mut mix = base.to_vec();
    let mut absence = ABSENCE_FACTOR[occ.index()];
    if day == DayType::Weekend {
        absence *= WEEKEND_ABSENCE;
    }
    mix[ActivityState::Absent.index()] *= absence;
    normalize(mix)
}

fn persist(base: &[f64], from: ActivityState) -> Vec<f64> {
    match from {
        ActivityState::Sleeping | ActivityState::Absent | ActivityState::Idle => {
            let mut row: Vec<f64> = base.iter().map(|p| p * (1.0 - PERSISTENCE)).collect();
            row[from.index()] += PERSISTENCE;
            row
        }
        _ => base.to_vec(),
    }
}

fn activity_durations(act: DurationActivity) -> (Vec<f64>, Vec<f64>) {
    match act {
        DurationActivity::Shower      => (vec![1.0, 2.0], vec![0.7, 0.3]),
        DurationActivity::Laundry     => (vec![2.0, 3.0, 4.0], vec![0.4, 0.4, 0.2]),
        DurationActivity::Cooking     => (vec![1.0, 2.0, 3.0, 4.0], vec![0.4, 0.3, 0.2, 0.1]),
        DurationActivity::Dishwashing => (vec![1.0, 2.0], vec![0.6, 0.4]),
    }
}

fn normalize(mut v: Vec<f64>) -> Vec<f64> {
    let sum: f64 = v.iter().sum();
    v.iter_mut().for_each(|p| *p /= sum);
    v
}
