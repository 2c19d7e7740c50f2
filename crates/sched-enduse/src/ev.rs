//! Electric-vehicle charging and discharging (`ev` stream).
//!
//! One occupant drives the vehicle.  Their year is split into contiguous
//! away and home runs.  Every away run gets a share of the annual driving
//! minutes proportional to its length, capped at a fraction of the run;
//! a fractional-minute carry keeps the running total on target.  Driving
//! is split around an idle middle (out at the start, back at the end), and
//! the vehicle charges for the whole of every home run.

use sched_core::{MINUTES_PER_SLOT, OccupantId, StreamRng, Vehicle};
use sched_tables::ActivityState;
use tracing::{debug, warn};

use crate::{MinuteSeries, SynthContext};

/// A contiguous stretch of minutes with the driver away or at home.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub start:   usize,
    pub minutes: usize,
    pub away:    bool,
}

/// The driver's charge/discharge series and how well the target was met.
#[derive(Clone, Debug)]
pub struct EvSchedule {
    pub occupant:          OccupantId,
    pub charging:          MinuteSeries,
    pub discharging:       MinuteSeries,
    /// 1 while the driver is at home.
    pub presence:          MinuteSeries,
    pub required_minutes:  f64,
    pub allocated_minutes: usize,
}

impl EvSchedule {
    /// Driving minutes the away time could not accommodate.
    pub fn shortfall_minutes(&self) -> f64 {
        (self.required_minutes - self.allocated_minutes as f64).max(0.0)
    }

    /// Combined column: discharging wherever it is non-zero (negated), else charging.
    pub fn combined(&self) -> MinuteSeries {
        let values = self
            .charging
            .as_slice()
            .iter()
            .zip(self.discharging.as_slice())
            .map(|(&c, &d)| if d != 0.0 { -d } else { c })
            .collect();
        MinuteSeries::from_vec(values)
    }
}

/// Choose the driver among occupants with `away_hours`.
///
/// Occupants whose away time times `max_share` exceeds `required_hours` are
/// eligible and one is picked uniformly; with none eligible the occupant
/// away the longest drives.  `None` only for an empty household.
pub fn select_driver(
    away_hours:     &[f64],
    required_hours: f64,
    max_share:      f64,
    rng:            &mut StreamRng,
) -> Option<OccupantId> {
    let eligible: Vec<usize> = away_hours
        .iter()
        .enumerate()
        .filter(|&(_, &h)| h * max_share > required_hours)
        .map(|(i, _)| i)
        .collect();

    let index = if eligible.is_empty() {
        away_hours
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &h)| match best {
                Some((_, b)) if b >= h => best,
                _ => Some((i, h)),
            })
            .map(|(i, _)| i)?
    } else {
        eligible[rng.gen_range(0..eligible.len())]
    };
    OccupantId::try_from(index).ok()
}

/// Split per-slot absence into minute runs.
pub fn runs(away_by_slot: impl IntoIterator<Item = bool>) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::new();
    for (slot, away) in away_by_slot.into_iter().enumerate() {
        match out.last_mut() {
            Some(run) if run.away == away => run.minutes += MINUTES_PER_SLOT,
            _ => out.push(Run { start: slot * MINUTES_PER_SLOT, minutes: MINUTES_PER_SLOT, away }),
        }
    }
    out
}

/// Driving minutes for each run (0 for home runs).
pub fn allocate_driving(runs: &[Run], required_minutes: f64, max_share: f64) -> Vec<usize> {
    let total_away: usize = runs.iter().filter(|r| r.away).map(|r| r.minutes).sum();
    if total_away == 0 {
        return vec![0; runs.len()];
    }

    let mut carry = 0.0;
    runs.iter()
        .map(|run| {
            if !run.away {
                return 0;
            }
            let exact = required_minutes * run.minutes as f64 / total_away as f64 + carry;
            let cap = (max_share * run.minutes as f64).floor();
            let allocated = exact.floor().min(cap).max(0.0);
            carry = exact - allocated;
            allocated as usize
        })
        .collect()
}

/// Charging and discharging for the household's vehicle.
pub fn ev_schedule(ctx: &SynthContext<'_>, vehicle: &Vehicle, rng: &mut StreamRng) -> Option<EvSchedule> {
    let share = ctx.constants.ev_max_driving_share;
    let required_hours = vehicle.annual_driving_hours(ctx.calendar.days());
    let occupant = select_driver(&ctx.household.away_hours(), required_hours, share, rng)?;
    let matrix = ctx.household.occupant(occupant);

    let slots = matrix.len().min(ctx.slots());
    let runs = runs((0..slots).map(|s| matrix.is(s, ActivityState::Absent)));
    let required_minutes = required_hours * 60.0;
    let allocation = allocate_driving(&runs, required_minutes, share);

    let minutes = ctx.minutes();
    let mut charging = MinuteSeries::zeros(minutes);
    let mut discharging = MinuteSeries::zeros(minutes);
    let mut presence = MinuteSeries::zeros(minutes);

    for (run, &driving) in runs.iter().zip(&allocation) {
        if run.away {
            let out = driving / 2;
            let back = driving - out;
            discharging.add(run.start, out, 1.0);
            discharging.add(run.start + run.minutes - back, back, 1.0);
        } else {
            charging.add(run.start, run.minutes, 1.0);
            presence.add(run.start, run.minutes, 1.0);
        }
    }

    let allocated_minutes: usize = allocation.iter().sum();
    let schedule = EvSchedule {
        occupant,
        charging,
        discharging,
        presence,
        required_minutes,
        allocated_minutes,
    };

    let shortfall = schedule.shortfall_minutes();
    if shortfall >= 1.0 {
        warn!(
            %occupant,
            required_minutes,
            allocated_minutes,
            "not enough away time for the vehicle's driving hours"
        );
    }
    debug!(%occupant, runs = runs.len(), allocated_minutes, "ev schedule generated");
    Some(schedule)
}
