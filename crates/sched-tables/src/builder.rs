//! `TablesBuilder`: assembles and validates a [`ProbabilityTables`].
//!
//! Every table domain is fixed: 4 occupancy types × 2 day types for the
//! Markov chain, 96 slots × 7 states per transition matrix, 3 time-of-day
//! buckets × 4 activities for durations, 4 event families, 4 appliances, and
//! 12 months × 2 day types per monthly-shift region.  [`TablesBuilder::build`]
//! rejects any gap or malformed row, so lookups never need a fallback.

use std::collections::HashMap;

use sched_core::{DayType, SLOTS_PER_DAY};

use crate::activity::{
    ActivityState, Appliance, DurationActivity, EventFamily, OccupancyType, TimeOfDay,
};
use crate::tables::{ApplianceProfile, Distribution, ProbabilityTables, Weights};
use crate::{TablesError, TablesResult};

/// Maximum allowed deviation of a probability row's sum from 1.
pub const PROBABILITY_TOLERANCE: f64 = 0.02;

const N_MARKOV: usize = OccupancyType::COUNT * 2;
const N_TRANSITION: usize = N_MARKOV * SLOTS_PER_DAY * ActivityState::COUNT;
const N_DURATION: usize = N_MARKOV * 3 * 4;

/// Incremental, validating builder for [`ProbabilityTables`].
pub struct TablesBuilder {
    initial:           Vec<Option<Vec<f64>>>,
    transition:        Vec<Option<Vec<f64>>>,
    activity_duration: Vec<Option<(Vec<f64>, Vec<f64>)>>,
    cluster_size:      Vec<Option<Vec<f64>>>,
    event_duration:    Vec<Option<(Vec<f64>, Vec<f64>)>>,
    appliances:        Vec<ApplianceProfile>,
    monthly_shift:     HashMap<String, [[Option<i32>; 2]; 12]>,
}

impl Default for TablesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TablesBuilder {
    pub fn new() -> Self {
        Self {
            initial:           vec![None; N_MARKOV],
            transition:        vec![None; N_TRANSITION],
            activity_duration: vec![None; N_DURATION],
            cluster_size:      vec![None; EventFamily::ALL.len()],
            event_duration:    vec![None; EventFamily::ALL.len()],
            appliances:        Appliance::ALL
                .iter()
                .map(|_| ApplianceProfile { durations: Vec::new(), powers: Vec::new() })
                .collect(),
            monthly_shift:     HashMap::new(),
        }
    }

    /// Set the start-of-day state probabilities (7 entries).
    pub fn initial(&mut self, occ: OccupancyType, day: DayType, probs: Vec<f64>) -> &mut Self {
        self.initial[ProbabilityTables::initial_idx(occ, day)] = Some(probs);
        self
    }

    /// Set one transition row (7 entries) for `from` at `slot`.
    pub fn transition(
        &mut self,
        occ:   OccupancyType,
        day:   DayType,
        slot:  usize,
        from:  ActivityState,
        probs: Vec<f64>,
    ) -> &mut Self {
        self.transition[ProbabilityTables::transition_idx(occ, day, slot, from)] = Some(probs);
        self
    }

    /// Set an activity-duration distribution (durations in 15-minute slots).
    pub fn activity_duration(
        &mut self,
        occ:       OccupancyType,
        day:       DayType,
        tod:       TimeOfDay,
        act:       DurationActivity,
        durations: Vec<f64>,
        probs:     Vec<f64>,
    ) -> &mut Self {
        self.activity_duration[ProbabilityTables::duration_idx(occ, day, tod, act)] =
            Some((durations, probs));
        self
    }

    /// Set cluster-size probabilities; entry `i` is the chance of `i + 1` events.
    pub fn cluster_size(&mut self, family: EventFamily, probs: Vec<f64>) -> &mut Self {
        self.cluster_size[family.index()] = Some(probs);
        self
    }

    /// Set the sub-event duration distribution (minutes).
    pub fn event_duration(
        &mut self,
        family:  EventFamily,
        minutes: Vec<f64>,
        probs:   Vec<f64>,
    ) -> &mut Self {
        self.event_duration[family.index()] = Some((minutes, probs));
        self
    }

    /// Append one duration row (15-minute units) for `appliance`.
    pub fn appliance_duration_row(&mut self, appliance: Appliance, row: Vec<f64>) -> &mut Self {
        self.appliances[appliance.index()].durations.push(row);
        self
    }

    /// Append one average-power row for `appliance`.
    pub fn appliance_power_row(&mut self, appliance: Appliance, row: Vec<f64>) -> &mut Self {
        self.appliances[appliance.index()].powers.push(row);
        self
    }

    /// Set the lead time (minutes) for `region`, zero-based `month`, `day`.
    pub fn monthly_shift(
        &mut self,
        region:  &str,
        month:   usize,
        day:     DayType,
        minutes: i32,
    ) -> &mut Self {
        let entry = self
            .monthly_shift
            .entry(region.to_string())
            .or_insert([[None; 2]; 12]);
        entry[month.min(11)][day.index()] = Some(minutes);
        self
    }

    /// Validate every table and freeze the store.
    pub fn build(self) -> TablesResult<ProbabilityTables> {
        // ── Markov chain ──────────────────────────────────────────────────
        let mut initial = Vec::with_capacity(N_MARKOV);
        let mut transition = Vec::with_capacity(N_TRANSITION);
        let mut activity_duration = Vec::with_capacity(N_DURATION);
        let mut rows = self.initial.into_iter();
        let mut trans = self.transition.into_iter();
        let mut durs = self.activity_duration.into_iter();

        for occ in OccupancyType::all() {
            for day in DayType::ALL {
                let what = || format!("initial probabilities ({occ}, {day})");
                let probs = rows.next().flatten().ok_or_else(|| TablesError::Missing(what()))?;
                check_probabilities(&what(), &probs, Some(ActivityState::COUNT))?;
                initial.push(Weights::new(probs));

                for slot in 0..SLOTS_PER_DAY {
                    for from in ActivityState::ALL {
                        let what = || format!("transition row ({occ}, {day}, slot {slot}, from {from})");
                        let probs =
                            trans.next().flatten().ok_or_else(|| TablesError::Missing(what()))?;
                        check_probabilities(&what(), &probs, Some(ActivityState::COUNT))?;
                        transition.push(Weights::new(probs));
                    }
                }

                for tod in TimeOfDay::ALL {
                    for act in DurationActivity::ALL {
                        let what = || {
                            format!(
                                "activity duration ({occ}, {day}, {}, {})",
                                tod.as_str(),
                                act.state()
                            )
                        };
                        let (values, probs) =
                            durs.next().flatten().ok_or_else(|| TablesError::Missing(what()))?;
                        check_distribution(&what(), &values, &probs, 1.0)?;
                        activity_duration.push(Distribution::new(values, probs));
                    }
                }
            }
        }

        // ── Event families ────────────────────────────────────────────────
        let mut cluster_size = Vec::with_capacity(EventFamily::ALL.len());
        let mut event_duration = Vec::with_capacity(EventFamily::ALL.len());
        for ((family, sizes), durations) in EventFamily::ALL
            .into_iter()
            .zip(self.cluster_size)
            .zip(self.event_duration)
        {
            let what = format!("cluster sizes ({family})");
            let sizes = sizes.ok_or_else(|| TablesError::Missing(what.clone()))?;
            check_probabilities(&what, &sizes, None)?;
            cluster_size.push(Weights::new(sizes));

            let what = format!("event durations ({family})");
            let (minutes, probs) = durations.ok_or_else(|| TablesError::Missing(what.clone()))?;
            check_distribution(&what, &minutes, &probs, f64::MIN_POSITIVE)?;
            event_duration.push(Distribution::new(minutes, probs));
        }

        // ── Appliances ────────────────────────────────────────────────────
        for (appliance, profile) in Appliance::ALL.iter().zip(&self.appliances) {
            check_rows(&format!("{appliance} duration rows"), &profile.durations)?;
            check_rows(&format!("{appliance} power rows"), &profile.powers)?;
        }

        // ── Monthly shifts ────────────────────────────────────────────────
        if self.monthly_shift.is_empty() {
            return Err(TablesError::Missing("monthly shift table (no regions)".to_string()));
        }
        let mut monthly_shift = HashMap::with_capacity(self.monthly_shift.len());
        for (region, months) in self.monthly_shift {
            let mut full = [[0i32; 2]; 12];
            for (m, days) in months.iter().enumerate() {
                for day in DayType::ALL {
                    full[m][day.index()] = days[day.index()].ok_or_else(|| {
                        TablesError::Missing(format!(
                            "monthly shift ({region}, month {}, {day})",
                            m + 1
                        ))
                    })?;
                }
            }
            monthly_shift.insert(region, full);
        }

        Ok(ProbabilityTables {
            initial,
            transition,
            activity_duration,
            cluster_size,
            event_duration,
            appliances: self.appliances,
            monthly_shift,
        })
    }
}

// ── Validation helpers ────────────────────────────────────────────────────────

fn malformed(what: &str, reason: String) -> TablesError {
    TablesError::Malformed { what: what.to_string(), reason }
}

fn check_probabilities(what: &str, probs: &[f64], expected_len: Option<usize>) -> TablesResult<()> {
    if let Some(n) = expected_len {
        if probs.len() != n {
            return Err(malformed(what, format!("expected {n} entries, found {}", probs.len())));
        }
    }
    if probs.is_empty() {
        return Err(malformed(what, "no entries".to_string()));
    }
    if let Some(p) = probs.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(malformed(what, format!("invalid probability {p}")));
    }
    let sum: f64 = probs.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(malformed(what, format!("probabilities sum to {sum:.4}, expected 1")));
    }
    Ok(())
}

fn check_distribution(what: &str, values: &[f64], probs: &[f64], min_value: f64) -> TablesResult<()> {
    if values.len() != probs.len() {
        return Err(malformed(
            what,
            format!("{} values but {} probabilities", values.len(), probs.len()),
        ));
    }
    if let Some(v) = values.iter().find(|v| !v.is_finite() || **v < min_value) {
        return Err(malformed(what, format!("value {v} is below {min_value}")));
    }
    check_probabilities(what, probs, None)
}

fn check_rows(what: &str, rows: &[Vec<f64>]) -> TablesResult<()> {
    if rows.is_empty() {
        return Err(TablesError::Missing(what.to_string()));
    }
    for (i, row) in rows.iter().enumerate() {
        if row.is_empty() {
            return Err(malformed(what, format!("row {i} is empty")));
        }
        if let Some(v) = row.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(malformed(what, format!("row {i} has invalid value {v}")));
        }
    }
    Ok(())
}
