//! Sink and shower/bath water draws (`hygiene` stream).
//!
//! Both generators draw their fixed flow rates first, then walk the year.
//! Every write is additive, so occupants drawing water in the same minute
//! accumulate.

use sched_core::{
    MINUTES_PER_DAY, MINUTES_PER_SLOT, SLOTS_PER_DAY, SLOTS_PER_HOUR, StreamRng, precompute, sample,
    sample_cumulative,
};
use sched_tables::{ActivityState, EventFamily};
use tracing::debug;

use crate::{MinuteSeries, SynthContext};

// ── Sink ──────────────────────────────────────────────────────────────────────

/// Sink clusters per day for a household of `occupants` (0 for an empty year).
pub fn sink_clusters_per_day(avg_clusters_per_household: f64, occupants: usize, days: usize) -> usize {
    if days == 0 {
        return 0;
    }
    let annual = avg_clusters_per_household * (0.29 * occupants as f64 + 0.26);
    (annual / days as f64).trunc() as usize
}

/// Sink draws.
///
/// Per day, cluster start minutes are drawn without replacement from
/// `awake-and-present minute × hourly onset`; a start minute already taken
/// is redrawn, up to `max_onset_attempts` times, after which the cluster is
/// dropped.  Each cluster is one or more sub-events separated by the sink gap.
pub fn sink(ctx: &SynthContext<'_>, rng: &mut StreamRng) -> MinuteSeries {
    let c = &ctx.constants.sink;
    let floor = ctx.constants.gaussian_floor;
    let flow = rng.gaussian(c.flow.flow_rate_mean, c.flow.flow_rate_std, floor);

    let days = ctx.calendar.days();
    let per_day = sink_clusters_per_day(c.avg_clusters_per_household, ctx.household.len(), days);
    let cluster_sizes = ctx.tables.cluster_size(EventFamily::Sink);
    let durations = ctx.tables.event_duration(EventFamily::Sink);
    let slots = ctx.household.slots().min(ctx.slots());
    let year_end = ctx.minutes();

    let mut series = MinuteSeries::zeros(year_end);
    let mut onset = vec![0.0f64; MINUTES_PER_DAY];
    let mut used = vec![false; MINUTES_PER_DAY];
    let mut dropped = 0usize;

    for day in 0..days {
        let first = day * SLOTS_PER_DAY;
        for (j, block) in onset.chunks_mut(MINUTES_PER_SLOT).enumerate() {
            let slot = first + j;
            let w = if slot < slots && ctx.household.any_awake_present(slot) {
                c.hourly_onset[j / SLOTS_PER_HOUR]
            } else {
                0.0
            };
            block.fill(w);
        }
        let mut cumulative = precompute(&onset);
        let total = cumulative.last().copied().unwrap_or(0.0);
        if total <= 0.0 {
            continue;
        }
        cumulative.iter_mut().for_each(|v| *v /= total);

        used.fill(false);
        for _ in 0..per_day {
            let Some(j) = (0..c.max_onset_attempts)
                .map(|_| sample_cumulative(rng, &cumulative))
                .find(|&j| !used[j])
            else {
                dropped += 1;
                continue;
            };
            used[j] = true;

            let events = cluster_sizes.sample(rng) + 1;
            let mut m = day * MINUTES_PER_DAY + j;
            for _ in 0..events {
                let d = series.add_event(m, durations.sample(rng), flow, year_end);
                m += d + c.flow.minutes_between_events;
            }
        }
    }

    debug!(flow, clusters_per_day = per_day, dropped, "sink draws generated");
    series
}

// ── Shower / bath ─────────────────────────────────────────────────────────────

/// Shower and bath draws.
///
/// At each slot with `N` occupants in the shower state, each of the `N`
/// draws bath-vs-shower.  A bath writes its whole (integer-minute) duration;
/// a shower writes a cluster of sub-events clipped to the slot.  The slot
/// pointer then skips every slot the busiest occupant's events consumed.
pub fn showers_and_baths(ctx: &SynthContext<'_>, rng: &mut StreamRng) -> MinuteSeries {
    let c = &ctx.constants.shower;
    let floor = ctx.constants.gaussian_floor;
    let shower_flow = rng.gaussian(c.flow.flow_rate_mean, c.flow.flow_rate_std, floor);
    let bath_flow = rng.gaussian(c.bath_flow_rate_mean, c.bath_flow_rate_std, floor);
    let bath_choice = [c.bath_ratio, 1.0 - c.bath_ratio];

    let cluster_sizes = ctx.tables.cluster_size(EventFamily::Shower);
    let durations = ctx.tables.event_duration(EventFamily::Shower);
    let year_end = ctx.minutes();
    let slots = ctx.household.slots().min(ctx.slots());

    let mut series = MinuteSeries::zeros(year_end);
    let (mut showers, mut baths) = (0usize, 0usize);
    let mut slot = 0;

    while slot < slots {
        let n = ctx.household.count_in_state(slot, ActivityState::Shower);
        if n == 0 {
            slot += 1;
            continue;
        }

        let start = SynthContext::slot_start(slot);
        let slot_end = start + MINUTES_PER_SLOT;
        let mut consumed = 0;

        for _ in 0..n {
            let mut m = 0;
            if sample(rng, &bath_choice) == 0 {
                let duration = rng.gaussian(c.bath_duration_mean, c.bath_duration_std, floor);
                m += series.add_event(start, duration, bath_flow, year_end);
                baths += 1;
            } else {
                let events = cluster_sizes.sample(rng) + 1;
                for k in 0..events {
                    m += series.add_event(start + m, durations.sample(rng), shower_flow, slot_end);
                    if k + 1 < events {
                        m += c.flow.minutes_between_events;
                    }
                    if m >= MINUTES_PER_SLOT {
                        break;
                    }
                }
                showers += 1;
            }
            consumed = consumed.max(m);
        }

        slot += consumed.div_ceil(MINUTES_PER_SLOT).max(1);
    }

    debug!(shower_flow, bath_flow, showers, baths, "shower and bath draws generated");
    series
}
