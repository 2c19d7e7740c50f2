//! Appliance water and power draws.
//!
//! # Water draws
//!
//! Dishwasher and clothes-washer hot water follow the shower pattern: at a
//! slot where the triggering state is active (at most one appliance runs at
//! a time) a cluster of sub-events is written, clipped to the run of active
//! slots, and the slot pointer skips past the minutes consumed.
//!
//! # Power draws
//!
//! Power triggers only on an activation edge (active now, inactive in the
//! previous slot).  One duration row and one power row are fixed per
//! appliance per run; each activation draws a cycle length (15-minute
//! units, scaled by the month's multiplier) and an average power from them.
//! The clothes dryer starts where each washer cycle ends.  One machine never
//! runs two cycles at once: an activation inside a running cycle is ignored.

use sched_core::{MINUTES_PER_DAY, MINUTES_PER_SLOT, StreamRng, UniformSource, sample};
use sched_tables::{ActivityState, Appliance, ApplianceProfile, EventFamily};
use tracing::debug;

use crate::{FlowDraw, MinuteSeries, SynthContext};

// ── Water draws ───────────────────────────────────────────────────────────────

/// Dishwasher hot water: one cluster per activation.
pub fn dishwasher_water(ctx: &SynthContext<'_>, rng: &mut StreamRng) -> MinuteSeries {
    water_draw(
        ctx,
        rng,
        ActivityState::Dishwashing,
        EventFamily::Dishwasher,
        &ctx.constants.hot_water_dishwasher,
        None,
    )
}

/// Clothes-washer hot water: one cluster per load, loads drawn per activation.
pub fn clothes_washer_water(ctx: &SynthContext<'_>, rng: &mut StreamRng) -> MinuteSeries {
    water_draw(
        ctx,
        rng,
        ActivityState::Laundry,
        EventFamily::ClothesWasher,
        &ctx.constants.hot_water_clothes_washer,
        Some(&ctx.constants.clothes_washer_load_probs),
    )
}

fn water_draw(
    ctx:        &SynthContext<'_>,
    rng:        &mut StreamRng,
    state:      ActivityState,
    family:     EventFamily,
    draw:       &FlowDraw,
    load_probs: Option<&[f64]>,
) -> MinuteSeries {
    let flow = rng.gaussian(draw.flow_rate_mean, draw.flow_rate_std, ctx.constants.gaussian_floor);
    let cluster_sizes = ctx.tables.cluster_size(family);
    let durations = ctx.tables.event_duration(family);
    let slots = ctx.household.slots().min(ctx.slots());

    let mut series = MinuteSeries::zeros(ctx.minutes());
    let mut activations = 0usize;
    let mut slot = 0;

    while slot < slots {
        if ctx.household.count_in_state(slot, state) == 0 {
            slot += 1;
            continue;
        }
        activations += 1;

        let start = SynthContext::slot_start(slot);
        let limit = SynthContext::slot_start(active_run_end(ctx, slot, state, slots));
        let loads = load_probs.map_or(1, |p| sample(rng, p) + 1);
        let mut m = 0;

        'loads: for load in 0..loads {
            let events = cluster_sizes.sample(rng) + 1;
            for k in 0..events {
                m += series.add_event(start + m, durations.sample(rng), flow, limit);
                if start + m >= limit {
                    break 'loads;
                }
                if k + 1 < events || load + 1 < loads {
                    m += draw.minutes_between_events;
                }
            }
        }

        slot += m.div_ceil(MINUTES_PER_SLOT).max(1);
    }

    debug!(%family, flow, activations, "appliance water draws generated");
    series
}

/// First slot at or after `slot` in which nobody is in `state`.
fn active_run_end(ctx: &SynthContext<'_>, slot: usize, state: ActivityState, slots: usize) -> usize {
    (slot..slots)
        .find(|&s| ctx.household.count_in_state(s, state) == 0)
        .unwrap_or(slots)
}

// ── Power draws ───────────────────────────────────────────────────────────────

/// One appliance cycle, `[start, end)` in minutes of the year.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cycle {
    pub start: usize,
    pub end:   usize,
}

/// A power series with the cycles that produced it.
#[derive(Clone, Debug)]
pub struct PowerDraw {
    pub series: MinuteSeries,
    pub cycles: Vec<Cycle>,
}

/// The duration and power rows an appliance uses for a whole run.
struct FixedProfile<'t> {
    durations: &'t [f64],
    powers:    &'t [f64],
}

impl<'t> FixedProfile<'t> {
    /// Pick one duration row, then one power row.
    fn pick(profile: &'t ApplianceProfile, rng: &mut StreamRng) -> Self {
        let d = rng.gen_range(0..profile.durations.len());
        let p = rng.gen_range(0..profile.powers.len());
        Self { durations: &profile.durations[d], powers: &profile.powers[p] }
    }

    /// Draw `(duration in 15-minute units, average power)` for one cycle.
    fn draw(&self, rng: &mut StreamRng) -> (f64, f64) {
        let d = self.durations[pick_index(rng, self.durations.len())];
        let p = self.powers[pick_index(rng, self.powers.len())];
        (d, p)
    }
}

fn pick_index(rng: &mut StreamRng, len: usize) -> usize {
    ((rng.uniform() * len as f64) as usize).min(len - 1)
}

/// Cycle length in whole minutes (at least 1).
fn cycle_minutes(units: f64, multiplier: f64) -> usize {
    (units * MINUTES_PER_SLOT as f64 * multiplier).round().max(1.0) as usize
}

/// Power draw triggered on each activation edge of `state`.
pub fn power_draw(
    ctx:       &SynthContext<'_>,
    appliance: Appliance,
    state:     ActivityState,
    rng:       &mut StreamRng,
) -> PowerDraw {
    let fixed = FixedProfile::pick(ctx.tables.appliance(appliance), rng);
    let multipliers = ctx.constants.duration_multipliers.for_appliance(appliance);
    let slots = ctx.household.slots().min(ctx.slots());

    let mut series = MinuteSeries::zeros(ctx.minutes());
    let mut cycles: Vec<Cycle> = Vec::new();
    let mut was_active = false;

    for slot in 0..slots {
        let active = ctx.household.count_in_state(slot, state) > 0;
        let start = SynthContext::slot_start(slot);
        let busy = cycles.last().is_some_and(|c| start < c.end);
        if active && !was_active && !busy {
            let (units, power) = fixed.draw(rng);
            let month = ctx.calendar.month_of_slot(slot);
            let minutes = cycle_minutes(units, multipliers[month]);
            series.add(start, minutes, power);
            cycles.push(Cycle { start, end: (start + minutes).min(series.len()) });
        }
        was_active = active;
    }

    debug!(%appliance, cycles = cycles.len(), "power draws generated");
    PowerDraw { series, cycles }
}

/// Clothes-dryer power, one cycle starting where each washer cycle ends.
pub fn dryer_after_washer(ctx: &SynthContext<'_>, washer: &[Cycle], rng: &mut StreamRng) -> PowerDraw {
    let fixed = FixedProfile::pick(ctx.tables.appliance(Appliance::ClothesDryer), rng);
    let multipliers = &ctx.constants.duration_multipliers.clothes_dryer;

    let year_end = ctx.minutes();
    let mut series = MinuteSeries::zeros(year_end);
    let mut cycles: Vec<Cycle> = Vec::with_capacity(washer.len());

    for w in washer.iter().filter(|w| w.end < year_end) {
        if cycles.last().is_some_and(|d| w.end < d.end) {
            continue;
        }
        let (units, power) = fixed.draw(rng);
        let month = ctx.calendar.month(w.end / MINUTES_PER_DAY);
        let minutes = cycle_minutes(units, multipliers[month]);
        series.add(w.end, minutes, power);
        cycles.push(Cycle { start: w.end, end: (w.end + minutes).min(year_end) });
    }

    debug!(cycles = cycles.len(), "dryer draws generated");
    PowerDraw { series, cycles }
}
