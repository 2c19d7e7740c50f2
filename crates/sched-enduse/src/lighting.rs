//! Location-dependent lighting shape (no randomness).
//!
//! Per month the sun's rise and set are computed for a representative
//! mid-month day.  The monthly half-hourly curve is the June baseline plus
//! an evening term that grows with how much earlier the sun sets than in
//! June.  The evening term is the larger of two Gaussians lagging sunset
//! by different amounts, so early dusk is dominated by the short-lag term
//! and late evening by the long-lag one.
//!
//! The dominant term is chosen hour by hour rather than once per month;
//! both terms track the month's sunset, so this approximates a per-month
//! switch between them.  North of [`HIGH_LATITUDE_THRESHOLD`] a single
//! fixed rise/set table stands in for per-band tables.

use std::f64::consts::PI;

use sched_core::{Calendar, Location};

/// At or above this latitude the closed-form rise/set is replaced by tables.
pub const HIGH_LATITUDE_THRESHOLD: f64 = 51.49;

/// Representative day of year for each month.
const MID_MONTH_DAY: [f64; 12] = [
    17.0, 47.0, 75.0, 105.0, 135.0, 162.0, 198.0, 228.0, 258.0, 288.0, 318.0, 344.0,
];

/// Local standard-time sunrise (hours) used at high latitudes.
const HIGH_LATITUDE_SUNRISE: [f64; 12] = [
    8.50, 7.55, 6.35, 5.05, 3.95, 3.25, 3.55, 4.55, 5.75, 6.95, 8.05, 8.75,
];

/// Local standard-time sunset (hours) used at high latitudes.
const HIGH_LATITUDE_SUNSET: [f64; 12] = [
    15.95, 17.05, 18.15, 19.30, 20.35, 21.10, 20.90, 19.90, 18.60, 17.30, 16.15, 15.65,
];

const JUNE: usize = 5;

/// June half-hourly lighting fraction, starting at 00:00.
const JUNE_BASELINE: [f64; 48] = [
    0.120, 0.090, 0.070, 0.060, 0.055, 0.050, 0.050, 0.050,
    0.055, 0.060, 0.080, 0.110, 0.150, 0.180, 0.190, 0.180,
    0.160, 0.140, 0.130, 0.125, 0.120, 0.120, 0.120, 0.120,
    0.120, 0.120, 0.120, 0.125, 0.130, 0.140, 0.150, 0.165,
    0.180, 0.200, 0.220, 0.250, 0.290, 0.340, 0.400, 0.460,
    0.520, 0.560, 0.570, 0.540, 0.460, 0.360, 0.250, 0.170,
];

/// `(amplitude per hour of earlier sunset, lag after sunset in hours, spread in hours)`.
const EVENING_TERMS: [(f64, f64, f64); 2] = [(0.085, 0.75, 0.9), (0.060, 2.75, 1.6)];

/// Sunrise and sunset in local standard time (decimal hours).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SunTimes {
    pub sunrise: f64,
    pub sunset:  f64,
}

impl SunTimes {
    pub fn day_length(&self) -> f64 {
        self.sunset - self.sunrise
    }
}

/// Rise and set for the representative day of `month` (0-based).
pub fn sun_times(location: &Location, month: usize) -> SunTimes {
    if location.latitude >= HIGH_LATITUDE_THRESHOLD {
        return SunTimes {
            sunrise: HIGH_LATITUDE_SUNRISE[month],
            sunset:  HIGH_LATITUDE_SUNSET[month],
        };
    }

    let n = MID_MONTH_DAY[month];
    let declination = (23.45 * (2.0 * PI * (284.0 + n) / 365.0).sin()).to_radians();
    let latitude = location.latitude.to_radians();
    let cos_omega = (-latitude.tan() * declination.tan()).clamp(-1.0, 1.0);
    let half_day = cos_omega.acos().to_degrees() / 15.0;

    // Equation of time, minutes.
    let b = 2.0 * PI * (n - 81.0) / 364.0;
    let eot = 9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin();

    let meridian = 15.0 * location.utc_offset_hours;
    let noon = 12.0 - (location.longitude - meridian) / 15.0 - eot / 60.0;
    SunTimes { sunrise: noon - half_day, sunset: noon + half_day }
}

/// Hourly lighting fractions per month plus each month's share of energy.
#[derive(Clone, Debug, PartialEq)]
pub struct LightingProfile {
    hourly:         [[f64; 24]; 12],
    monthly_energy: [f64; 12],
}

impl LightingProfile {
    pub fn new(location: &Location) -> Self {
        let june_sunset = sun_times(location, JUNE).sunset;
        let mut hourly = [[0.0; 24]; 12];
        let mut monthly_energy = [0.0; 12];

        for (month, row) in hourly.iter_mut().enumerate() {
            let sunset = sun_times(location, month).sunset;
            let earlier = (june_sunset - sunset).max(0.0);

            for (h, value) in row.iter_mut().enumerate() {
                *value = (0..2)
                    .map(|half| {
                        let i = 2 * h + half;
                        let t = i as f64 * 0.5 + 0.25;
                        JUNE_BASELINE[i] + earlier * evening(t, sunset)
                    })
                    .sum();
            }

            let total: f64 = row.iter().sum();
            monthly_energy[month] = total;
            if total > 0.0 {
                row.iter_mut().for_each(|v| *v /= total);
            }
        }

        let annual: f64 = monthly_energy.iter().sum();
        if annual > 0.0 {
            monthly_energy.iter_mut().for_each(|e| *e /= annual);
        }
        Self { hourly, monthly_energy }
    }

    /// `[month][hour]`, each month summing to 1.
    pub fn hourly(&self) -> &[[f64; 24]; 12] {
        &self.hourly
    }

    /// Each month's share of annual lighting energy.
    pub fn monthly_energy(&self) -> &[f64; 12] {
        &self.monthly_energy
    }

    /// One value per hour of the year (`days × 24`), peaking at 1.
    pub fn expand(&self, calendar: &Calendar) -> Vec<f64> {
        let mut out = Vec::with_capacity(calendar.days() * 24);
        for day in 0..calendar.days() {
            let month = calendar.month(day);
            let weight = self.monthly_energy[month];
            out.extend(self.hourly[month].iter().map(|v| v * weight));
        }
        let peak = out.iter().copied().fold(0.0, f64::max);
        if peak > 0.0 {
            out.iter_mut().for_each(|v| *v /= peak);
        }
        out
    }
}

/// Evening term at clock time `t` for a given sunset, per hour of earlier sunset.
fn evening(t: f64, sunset: f64) -> f64 {
    EVENING_TERMS
        .iter()
        .map(|&(amplitude, lag, spread)| {
            let x = t - (sunset + lag);
            amplitude * (-(x * x) / (2.0 * spread * spread)).exp()
        })
        .fold(0.0, f64::max)
}
