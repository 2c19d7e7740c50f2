//! Presence-gated continuous draws.
//!
//! These carry no randomness: each 15-minute slot is filled with a value
//! derived from the share of occupants in a given state.  "Active" means
//! at home and awake, `1 − away − asleep`.

use sched_core::{SLOTS_PER_DAY, SLOTS_PER_HOUR};
use sched_tables::ActivityState;

use crate::{LoadCurve, MinuteSeries, SynthContext};

/// `(day, hour, month)` of a slot.
#[inline]
fn slot_clock(ctx: &SynthContext<'_>, slot: usize) -> (usize, usize, usize) {
    let day = slot / SLOTS_PER_DAY;
    let hour = (slot % SLOTS_PER_DAY) / SLOTS_PER_HOUR;
    (day, hour, ctx.calendar.month(day))
}

fn fill_slots(ctx: &SynthContext<'_>, mut value: impl FnMut(usize) -> f64) -> MinuteSeries {
    let mut series = MinuteSeries::zeros(ctx.minutes());
    for slot in 0..ctx.household.slots().min(ctx.slots()) {
        series.fill_slot(slot, value(slot));
    }
    series
}

/// Share of occupants at home.
pub fn occupancy(ctx: &SynthContext<'_>) -> MinuteSeries {
    fill_slots(ctx, |slot| {
        if ctx.household.is_empty() {
            return 0.0;
        }
        1.0 - ctx.household.fraction_in_state(slot, ActivityState::Absent)
    })
}

/// Share of occupants asleep.
pub fn sleeping(ctx: &SynthContext<'_>) -> MinuteSeries {
    fill_slots(ctx, |slot| ctx.household.fraction_in_state(slot, ActivityState::Sleeping))
}

/// Interior lighting: the day's minimum plus the active share of the rest.
///
/// `hourly_curve` is the expanded lighting profile, one value per hour of
/// the year.
pub fn lighting_interior(ctx: &SynthContext<'_>, hourly_curve: &[f64]) -> MinuteSeries {
    fill_slots(ctx, |slot| {
        let (day, hour, _) = slot_clock(ctx, slot);
        let Some(today) = hourly_curve.get(day * 24..day * 24 + 24) else {
            return 0.0;
        };
        let floor = today.iter().copied().fold(f64::INFINITY, f64::min);
        floor + ctx.household.active_fraction(slot) * (today[hour] - floor)
    })
}

/// Garage lighting follows the lighting profile regardless of occupancy.
pub fn lighting_garage(ctx: &SynthContext<'_>, hourly_curve: &[f64]) -> MinuteSeries {
    fill_slots(ctx, |slot| {
        let (day, hour, _) = slot_clock(ctx, slot);
        hourly_curve.get(day * 24 + hour).copied().unwrap_or(0.0)
    })
}

/// Plug load interpolated between the curve's minimum and its hourly value.
pub fn plug_load(ctx: &SynthContext<'_>, curve: &LoadCurve) -> MinuteSeries {
    let floor = curve.hourly.iter().copied().fold(f64::INFINITY, f64::min);
    fill_slots(ctx, |slot| {
        let (_, hour, month) = slot_clock(ctx, slot);
        let active = ctx.household.active_fraction(slot);
        (floor + active * (curve.hourly[hour] - floor)) * curve.monthly[month]
    })
}

/// Ceiling fan: hourly curve scaled by the share at home, in operating months.
pub fn ceiling_fan(ctx: &SynthContext<'_>, curve: &LoadCurve, months: &[bool; 12]) -> MinuteSeries {
    fill_slots(ctx, |slot| {
        let (_, hour, month) = slot_clock(ctx, slot);
        if !months[month] || ctx.household.is_empty() {
            return 0.0;
        }
        let home = 1.0 - ctx.household.fraction_in_state(slot, ActivityState::Absent);
        curve.hourly[hour] * curve.monthly[month] * home
    })
}
