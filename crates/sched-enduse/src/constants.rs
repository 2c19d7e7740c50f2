//! Empirical scalars and curves used by the synthesizers.
//!
//! Defaults are built in.  With the `serde` feature every struct
//! deserializes with `#[serde(default)]`, so a TOML file can override a
//! single field (say `shower.bath_ratio`) and keep the rest.
//!
//! Flow rates are in gallons per minute; the post-processor normalizes
//! every series, so only their relative scale matters.

use sched_tables::Appliance;

use crate::{EndUseError, EndUseResult};

/// Allowed deviation of `clothes_washer_load_probs` from a unit sum.
const LOAD_PROB_TOLERANCE: f64 = 0.02;

// ── Water draws ───────────────────────────────────────────────────────────────

/// Flow magnitude and spacing of one water-draw family.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlowDraw {
    pub flow_rate_mean:         f64,
    pub flow_rate_std:          f64,
    /// Gap between consecutive sub-events of a cluster.
    pub minutes_between_events: usize,
}

impl FlowDraw {
    const fn new(flow_rate_mean: f64, flow_rate_std: f64, minutes_between_events: usize) -> Self {
        Self { flow_rate_mean, flow_rate_std, minutes_between_events }
    }
}

impl Default for FlowDraw {
    fn default() -> Self {
        Self::new(1.0, 0.0, 1)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SinkConstants {
    pub flow:                       FlowDraw,
    /// Annual sink clusters of an average household.
    pub avg_clusters_per_household: f64,
    /// Probability that a cluster starts in each clock hour.
    pub hourly_onset:               [f64; 24],
    /// Draws allowed per cluster before giving up on a free start slot.
    pub max_onset_attempts:         usize,
}

impl Default for SinkConstants {
    fn default() -> Self {
        Self {
            flow:                       FlowDraw::new(1.14, 0.61, 2),
            avg_clusters_per_household: 6657.0,
            hourly_onset:               [
                0.0103, 0.0051, 0.0041, 0.0041, 0.0062, 0.0154, 0.0463, 0.0720,
                0.0700, 0.0597, 0.0535, 0.0514, 0.0535, 0.0494, 0.0453, 0.0432,
                0.0473, 0.0566, 0.0669, 0.0700, 0.0638, 0.0514, 0.0360, 0.0185,
            ],
            max_onset_attempts:         10,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShowerConstants {
    pub flow:                FlowDraw,
    /// Chance that a shower activity is a bath instead.
    pub bath_ratio:          f64,
    pub bath_duration_mean:  f64,
    pub bath_duration_std:   f64,
    pub bath_flow_rate_mean: f64,
    pub bath_flow_rate_std:  f64,
}

impl Default for ShowerConstants {
    fn default() -> Self {
        Self {
            flow:                FlowDraw::new(2.25, 0.68, 3),
            bath_ratio:          0.078,
            bath_duration_mean:  5.65,
            bath_duration_std:   2.09,
            bath_flow_rate_mean: 4.4,
            bath_flow_rate_std:  1.17,
        }
    }
}

// ── Appliances ────────────────────────────────────────────────────────────────

/// Month-of-year multipliers on appliance cycle durations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DurationMultipliers {
    pub dishwasher:     [f64; 12],
    pub clothes_washer: [f64; 12],
    pub clothes_dryer:  [f64; 12],
    pub cooking_range:  [f64; 12],
}

impl Default for DurationMultipliers {
    fn default() -> Self {
        let kitchen = [1.097, 1.097, 0.991, 0.987, 0.991, 0.890, 0.896, 0.896, 0.890, 1.085, 1.085, 1.097];
        let laundry = [1.011, 1.002, 1.022, 1.020, 1.022, 0.996, 0.999, 0.999, 0.996, 0.964, 0.959, 1.011];
        Self {
            dishwasher:     kitchen,
            clothes_washer: laundry,
            clothes_dryer:  laundry,
            cooking_range:  kitchen,
        }
    }
}

impl DurationMultipliers {
    pub fn for_appliance(&self, appliance: Appliance) -> &[f64; 12] {
        match appliance {
            Appliance::Dishwasher    => &self.dishwasher,
            Appliance::ClothesWasher => &self.clothes_washer,
            Appliance::ClothesDryer  => &self.clothes_dryer,
            Appliance::CookingRange  => &self.cooking_range,
        }
    }
}

// ── Load curves ───────────────────────────────────────────────────────────────

/// Hour-of-day shape and month-of-year multiplier for a continuous load.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoadCurve {
    pub hourly:  [f64; 24],
    pub monthly: [f64; 12],
}

impl Default for LoadCurve {
    fn default() -> Self {
        Self { hourly: [1.0 / 24.0; 24], monthly: [1.0; 12] }
    }
}

impl LoadCurve {
    fn plug_loads_other() -> Self {
        Self {
            hourly:  [
                0.035, 0.033, 0.032, 0.031, 0.032, 0.033, 0.037, 0.042, 0.043, 0.043, 0.043, 0.044,
                0.045, 0.045, 0.044, 0.046, 0.048, 0.052, 0.053, 0.050, 0.047, 0.045, 0.040, 0.036,
            ],
            monthly: [1.248, 1.257, 0.993, 0.989, 0.993, 0.827, 0.821, 0.821, 0.827, 0.990, 0.987, 1.248],
        }
    }

    fn plug_loads_tv() -> Self {
        Self {
            hourly:  [
                0.037, 0.018, 0.009, 0.007, 0.011, 0.018, 0.029, 0.040, 0.049, 0.058, 0.065, 0.072,
                0.076, 0.086, 0.091, 0.102, 0.114, 0.126, 0.138, 0.146, 0.156, 0.150, 0.128, 0.085,
            ],
            monthly: [1.137, 1.129, 0.961, 0.969, 0.961, 0.993, 0.996, 0.960, 0.993, 0.867, 0.860, 1.137],
        }
    }

    fn ceiling_fan() -> Self {
        Self {
            hourly:  [
                0.057, 0.057, 0.057, 0.057, 0.057, 0.057, 0.057, 0.024, 0.024, 0.024, 0.024, 0.024,
                0.024, 0.024, 0.024, 0.024, 0.024, 0.024, 0.052, 0.057, 0.057, 0.057, 0.057, 0.057,
            ],
            monthly: [1.0; 12],
        }
    }
}

// ── EndUseConstants ───────────────────────────────────────────────────────────

/// Every empirical scalar the synthesizers use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EndUseConstants {
    /// Lower bound on every Gaussian draw (flow rates, bath duration).
    pub gaussian_floor:            f64,
    pub sink:                      SinkConstants,
    pub shower:                    ShowerConstants,
    pub hot_water_dishwasher:      FlowDraw,
    pub hot_water_clothes_washer:  FlowDraw,
    /// Entry `i` is the chance that a laundry activity runs `i + 1` loads.
    pub clothes_washer_load_probs: Vec<f64>,
    pub duration_multipliers:      DurationMultipliers,
    pub plug_loads_other:          LoadCurve,
    pub plug_loads_tv:             LoadCurve,
    pub ceiling_fan:               LoadCurve,
    /// Largest share of one away period that may be spent driving.
    pub ev_max_driving_share:      f64,
}

impl Default for EndUseConstants {
    fn default() -> Self {
        Self {
            gaussian_floor:            0.1,
            sink:                      SinkConstants::default(),
            shower:                    ShowerConstants::default(),
            hot_water_dishwasher:      FlowDraw::new(1.39, 0.2, 10),
            hot_water_clothes_washer:  FlowDraw::new(2.2, 0.62, 4),
            clothes_washer_load_probs: vec![0.6, 0.3, 0.1],
            duration_multipliers:      DurationMultipliers::default(),
            plug_loads_other:          LoadCurve::plug_loads_other(),
            plug_loads_tv:             LoadCurve::plug_loads_tv(),
            ceiling_fan:               LoadCurve::ceiling_fan(),
            ev_max_driving_share:      0.8,
        }
    }
}

impl EndUseConstants {
    /// Reject values the synthesizers cannot use.
    pub fn validate(&self) -> EndUseResult<()> {
        for (name, flow) in [
            ("sink.flow", &self.sink.flow),
            ("shower.flow", &self.shower.flow),
            ("hot_water_dishwasher", &self.hot_water_dishwasher),
            ("hot_water_clothes_washer", &self.hot_water_clothes_washer),
        ] {
            non_negative(name, flow.flow_rate_mean)?;
            non_negative(name, flow.flow_rate_std)?;
        }
        non_negative("gaussian_floor", self.gaussian_floor)?;
        non_negative("sink.avg_clusters_per_household", self.sink.avg_clusters_per_household)?;
        if self.sink.max_onset_attempts == 0 {
            return Err(invalid("sink.max_onset_attempts", "must be at least 1".to_string()));
        }
        weights("sink.hourly_onset", &self.sink.hourly_onset)?;

        if !(0.0..=1.0).contains(&self.shower.bath_ratio) {
            return Err(invalid(
                "shower.bath_ratio",
                format!("{} is outside [0, 1]", self.shower.bath_ratio),
            ));
        }
        non_negative("shower.bath_duration_mean", self.shower.bath_duration_mean)?;
        non_negative("shower.bath_duration_std", self.shower.bath_duration_std)?;
        non_negative("shower.bath_flow_rate_mean", self.shower.bath_flow_rate_mean)?;
        non_negative("shower.bath_flow_rate_std", self.shower.bath_flow_rate_std)?;

        weights("clothes_washer_load_probs", &self.clothes_washer_load_probs)?;
        let sum: f64 = self.clothes_washer_load_probs.iter().sum();
        if (sum - 1.0).abs() > LOAD_PROB_TOLERANCE {
            return Err(invalid(
                "clothes_washer_load_probs",
                format!("probabilities sum to {sum:.4}, expected 1"),
            ));
        }

        let m = &self.duration_multipliers;
        for (name, months) in [
            ("duration_multipliers.dishwasher", &m.dishwasher),
            ("duration_multipliers.clothes_washer", &m.clothes_washer),
            ("duration_multipliers.clothes_dryer", &m.clothes_dryer),
            ("duration_multipliers.cooking_range", &m.cooking_range),
        ] {
            for &v in months {
                non_negative(name, v)?;
            }
        }

        for (name, curve) in [
            ("plug_loads_other", &self.plug_loads_other),
            ("plug_loads_tv", &self.plug_loads_tv),
            ("ceiling_fan", &self.ceiling_fan),
        ] {
            weights(name, &curve.hourly)?;
            for &v in &curve.monthly {
                non_negative(name, v)?;
            }
        }

        if !(self.ev_max_driving_share > 0.0 && self.ev_max_driving_share <= 1.0) {
            return Err(invalid(
                "ev_max_driving_share",
                format!("{} is outside (0, 1]", self.ev_max_driving_share),
            ));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> EndUseError {
    EndUseError::InvalidConstant { name, reason }
}

fn non_negative(name: &'static str, v: f64) -> EndUseResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(invalid(name, format!("{v} is not a non-negative number")));
    }
    Ok(())
}

fn weights(name: &'static str, values: &[f64]) -> EndUseResult<()> {
    if values.is_empty() {
        return Err(invalid(name, "no entries".to_string()));
    }
    for &v in values {
        non_negative(name, v)?;
    }
    if values.iter().sum::<f64>() <= 0.0 {
        return Err(invalid(name, "all entries are zero".to_string()));
    }
    Ok(())
}
