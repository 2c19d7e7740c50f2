//! The immutable probability table store.
//!
//! `ProbabilityTables` is built once per run (by [`TablesBuilder`] or the CSV
//! loader, both of which validate) and then shared by reference with every
//! simulator and synthesizer.  Keys are typed enums, so every lookup with a
//! well-formed key is total; the only string key is the monthly-shift region,
//! which callers check once with [`ProbabilityTables::monthly_shifts`].
//!
//! [`TablesBuilder`]: crate::TablesBuilder

use std::collections::HashMap;

use sched_core::{DayType, SLOTS_PER_DAY, UniformSource, precompute, sample_cumulative};

use crate::activity::{
    ActivityState, Appliance, DurationActivity, EventFamily, OccupancyType, TimeOfDay,
};

// ── Weights ───────────────────────────────────────────────────────────────────

/// A validated probability vector with its cumulative weights precomputed.
#[derive(Clone, Debug, PartialEq)]
pub struct Weights {
    weights:    Vec<f64>,
    cumulative: Vec<f64>,
}

impl Weights {
    pub(crate) fn new(weights: Vec<f64>) -> Self {
        let cumulative = precompute(&weights);
        Self { weights, cumulative }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Draw a zero-based index (one uniform draw).
    #[inline]
    pub fn sample<R: UniformSource + ?Sized>(&self, rng: &mut R) -> usize {
        sample_cumulative(rng, &self.cumulative)
    }
}

// ── Distribution ──────────────────────────────────────────────────────────────

/// Paired `(value, probability)` distribution.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
    values:  Vec<f64>,
    weights: Weights,
}

impl Distribution {
    pub(crate) fn new(values: Vec<f64>, probabilities: Vec<f64>) -> Self {
        Self { values, weights: Weights::new(probabilities) }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn probabilities(&self) -> &[f64] {
        self.weights.as_slice()
    }

    /// Draw a value (one uniform draw).
    #[inline]
    pub fn sample<R: UniformSource + ?Sized>(&self, rng: &mut R) -> f64 {
        self.values[self.weights.sample(rng)]
    }
}

// ── ApplianceProfile ──────────────────────────────────────────────────────────

/// Joint duration/power rows for one appliance.
///
/// Each row is a set of observed values.  A run fixes one duration row and
/// one power row and draws from within them, so a single household's
/// appliance behaves consistently all year.
#[derive(Clone, Debug, PartialEq)]
pub struct ApplianceProfile {
    /// Cycle durations in 15-minute units.
    pub durations: Vec<Vec<f64>>,
    /// Average cycle power.
    pub powers:    Vec<Vec<f64>>,
}

// ── ProbabilityTables ─────────────────────────────────────────────────────────

/// All empirical distributions for one run.  Read-only after construction.
#[derive(Clone, Debug)]
pub struct ProbabilityTables {
    /// `[occupancy][day_type]`, 7 entries each.
    pub(crate) initial:           Vec<Weights>,
    /// `[occupancy][day_type][slot][from_state]`, 7 entries each.
    pub(crate) transition:        Vec<Weights>,
    /// `[occupancy][day_type][time_of_day][activity]`.
    pub(crate) activity_duration: Vec<Distribution>,
    /// `[family]`; index `i` means a cluster of `i + 1` events.
    pub(crate) cluster_size:      Vec<Weights>,
    /// `[family]`; values in minutes.
    pub(crate) event_duration:    Vec<Distribution>,
    /// `[appliance]`.
    pub(crate) appliances:        Vec<ApplianceProfile>,
    /// region → `[month][day_type]` lead time in minutes.
    pub(crate) monthly_shift:     HashMap<String, [[i32; 2]; 12]>,
}

/// Monthly lead times of one region, `[month][day_type]`.
pub type MonthlyShifts = [[i32; 2]; 12];

impl ProbabilityTables {
    // ── Index helpers ─────────────────────────────────────────────────────

    #[inline]
    pub(crate) fn initial_idx(occ: OccupancyType, day: DayType) -> usize {
        occ.index() * 2 + day.index()
    }

    #[inline]
    pub(crate) fn transition_idx(
        occ:  OccupancyType,
        day:  DayType,
        slot: usize,
        from: ActivityState,
    ) -> usize {
        debug_assert!(slot < SLOTS_PER_DAY, "slot {slot} out of range");
        ((Self::initial_idx(occ, day) * SLOTS_PER_DAY) + slot) * ActivityState::COUNT + from.index()
    }

    #[inline]
    pub(crate) fn duration_idx(
        occ: OccupancyType,
        day: DayType,
        tod: TimeOfDay,
        act: DurationActivity,
    ) -> usize {
        (Self::initial_idx(occ, day) * 3 + tod.index()) * DurationActivity::ALL.len() + act.index()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Start-of-day state probabilities.
    #[inline]
    pub fn initial(&self, occ: OccupancyType, day: DayType) -> &Weights {
        &self.initial[Self::initial_idx(occ, day)]
    }

    /// Next-state probabilities given the state left behind and the slot
    /// (0–95, in the tables' own day alignment) being entered.
    #[inline]
    pub fn transition(
        &self,
        occ:  OccupancyType,
        day:  DayType,
        slot: usize,
        from: ActivityState,
    ) -> &Weights {
        &self.transition[Self::transition_idx(occ, day, slot, from)]
    }

    /// Duration distribution, in 15-minute slots.
    #[inline]
    pub fn activity_duration(
        &self,
        occ: OccupancyType,
        day: DayType,
        tod: TimeOfDay,
        act: DurationActivity,
    ) -> &Distribution {
        &self.activity_duration[Self::duration_idx(occ, day, tod, act)]
    }

    /// Cluster-size probabilities; a sampled index `i` means `i + 1` events.
    #[inline]
    pub fn cluster_size(&self, family: EventFamily) -> &Weights {
        &self.cluster_size[family.index()]
    }

    /// Sub-event duration distribution in minutes.
    #[inline]
    pub fn event_duration(&self, family: EventFamily) -> &Distribution {
        &self.event_duration[family.index()]
    }

    #[inline]
    pub fn appliance(&self, appliance: Appliance) -> &ApplianceProfile {
        &self.appliances[appliance.index()]
    }

    /// Monthly lead times for `region`, or `None` if the region is unknown.
    pub fn monthly_shifts(&self, region: &str) -> Option<&MonthlyShifts> {
        self.monthly_shift.get(region)
    }

    /// Known monthly-shift regions, sorted.
    pub fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = self.monthly_shift.keys().map(String::as_str).collect();
        regions.sort_unstable();
        regions
    }
}
