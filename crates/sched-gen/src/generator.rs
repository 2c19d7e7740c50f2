//! The `ScheduleGenerator` and its run sequence.

use sched_core::{Calendar, RngStreams, ScheduleConfig, Stream};
use sched_enduse::appliance::{clothes_washer_water, dishwasher_water, dryer_after_washer, power_draw};
use sched_enduse::ev::ev_schedule;
use sched_enduse::hygiene::{showers_and_baths, sink};
use sched_enduse::{EndUseConstants, EvSchedule, LightingProfile, MinuteSeries, SynthContext, presence};
use sched_markov::MarkovSimulator;
use sched_tables::{ActivityState, Appliance, MonthlyShifts, ProbabilityTables};
use tracing::{debug, info, warn};

use crate::postprocess::{PostProcessor, draw_offset};
use crate::{Column, GenResult, GenerationObserver, Outcome, RunReport, ScheduleSet};

/// Raw per-minute series for every end use of one run.
struct RawSeries {
    occupants:                MinuteSeries,
    sleeping:                 MinuteSeries,
    lighting_interior:        MinuteSeries,
    lighting_garage:          MinuteSeries,
    plug_loads_other:         MinuteSeries,
    plug_loads_tv:            MinuteSeries,
    ceiling_fan:              MinuteSeries,
    hot_water_fixtures:       MinuteSeries,
    hot_water_dishwasher:     MinuteSeries,
    hot_water_clothes_washer: MinuteSeries,
    dishwasher:               MinuteSeries,
    clothes_washer:           MinuteSeries,
    clothes_dryer:            MinuteSeries,
    cooking_range:            MinuteSeries,
    ev:                       Option<EvSchedule>,
}

/// Generates one household's schedules.
///
/// Create via [`GeneratorBuilder`][crate::GeneratorBuilder].  A generator
/// may be run any number of times; with a fixed seed every run is
/// identical.
///
/// # Run sequence
///
/// ```text
/// streams ← RngStreams(seed)                 // all seven, fixed order
/// household ← Markov(main)                   // every occupant, id order
/// offset ← main                              // ±30 min, shared by all columns
/// raw ← hygiene | dishwasher | clothes_washer | clothes_dryer | cooking | ev
///       + presence-derived series (no randomness)
/// for column in requested: post-process raw[column]
/// ```
///
/// Every family is synthesized on its own stream whether or not its column
/// is requested, so the requested set never changes any column's values.
pub struct ScheduleGenerator<'a> {
    pub(crate) config:    ScheduleConfig,
    pub(crate) tables:    &'a ProbabilityTables,
    pub(crate) constants: EndUseConstants,
    pub(crate) columns:   Vec<Column>,
    pub(crate) calendar:  Calendar,
    pub(crate) shifts:    MonthlyShifts,
}

impl<'a> ScheduleGenerator<'a> {
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Run the whole year.
    pub fn generate<O: GenerationObserver>(&self, observer: &mut O) -> GenResult<Outcome> {
        let count = self.config.occupant_count();
        if self.config.occupants.fract() != 0.0 {
            let message = format!(
                "fractional occupant count {} truncated to {count}",
                self.config.occupants
            );
            warn!("{message}");
            observer.on_warning(&message);
        }
        if count == 0 {
            info!("no occupants; no schedules generated");
            return Ok(Outcome::NoOccupants);
        }

        let mut streams = RngStreams::new(self.config.seed);
        info!(
            seed = streams.seed(),
            occupants = self.config.reported_occupants(),
            calendar = %self.calendar,
            columns = self.columns.len(),
            "generating schedules"
        );

        // ── Markov phase ──────────────────────────────────────────────────
        let simulator = MarkovSimulator::new(self.tables, &self.calendar);
        let household = simulator.simulate_household(count, &mut streams, |id, m| {
            observer.on_occupant(id, m)
        });

        let offset = draw_offset(streams.get_mut(Stream::Main));
        let post = PostProcessor::new(
            &self.calendar,
            self.shifts,
            self.config.timestep_minutes as usize,
            offset,
        );
        debug!(offset, "post-processing offset drawn");

        // ── End uses ──────────────────────────────────────────────────────
        let ctx = SynthContext::new(self.tables, &self.calendar, &household, &self.constants);
        let raw = self.synthesize(&ctx, &mut streams);

        let (ev_occupant, ev_shortfall_minutes) = match &raw.ev {
            Some(ev) => (Some(ev.occupant), ev.shortfall_minutes()),
            None => (None, 0.0),
        };
        if ev_shortfall_minutes >= 1.0 {
            observer.on_warning(&format!(
                "EV driving needs {ev_shortfall_minutes:.0} more minutes than the away time allows"
            ));
        }

        // ── Post-processing ───────────────────────────────────────────────
        let timestep = self.config.timestep_minutes as f64;
        let rows = self.calendar.minutes() / self.config.timestep_minutes as usize;
        let mut columns = Vec::with_capacity(self.columns.len());
        for &column in &self.columns {
            let values = match column {
                Column::ElectricVehicle => raw.ev.as_ref().map(|ev| {
                    post.random_shift_and_normalize(ev.combined().as_slice(), Some(timestep))
                }),
                _ => raw.series(column).map(|(series, max_val)| {
                    post.random_shift_and_normalize(series.as_slice(), max_val.then_some(timestep))
                }),
            }
            .unwrap_or_else(|| vec![0.0; rows]);

            debug!(%column, max = values.iter().copied().fold(0.0, f64::max), "column generated");
            observer.on_column(column, &values);
            columns.push((column, values));
        }

        let report = RunReport {
            seed: streams.seed(),
            occupants: self.config.reported_occupants(),
            ev_occupant,
            ev_shortfall_minutes,
        };
        observer.on_run_end(&report);
        info!(seed = report.seed, "schedules generated");

        Ok(Outcome::Generated(ScheduleSet {
            columns,
            timestep_minutes: self.config.timestep_minutes,
            report,
        }))
    }

    fn synthesize(&self, ctx: &SynthContext<'_>, streams: &mut RngStreams) -> RawSeries {
        let rng = streams.get_mut(Stream::Hygiene);
        let mut hot_water_fixtures = sink(ctx, rng);
        let showers = showers_and_baths(ctx, rng);
        hot_water_fixtures.add_series(&showers);

        let rng = streams.get_mut(Stream::Dishwasher);
        let hot_water_dishwasher = dishwasher_water(ctx, rng);
        let dishwasher = power_draw(ctx, Appliance::Dishwasher, ActivityState::Dishwashing, rng);

        let rng = streams.get_mut(Stream::ClothesWasher);
        let hot_water_clothes_washer = clothes_washer_water(ctx, rng);
        let washer = power_draw(ctx, Appliance::ClothesWasher, ActivityState::Laundry, rng);

        let dryer = dryer_after_washer(ctx, &washer.cycles, streams.get_mut(Stream::ClothesDryer));

        let ev = self
            .config
            .vehicle
            .as_ref()
            .and_then(|v| ev_schedule(ctx, v, streams.get_mut(Stream::Ev)));

        let cooking = power_draw(
            ctx,
            Appliance::CookingRange,
            ActivityState::Cooking,
            streams.get_mut(Stream::Cooking),
        );

        let lighting = LightingProfile::new(&self.config.location).expand(&self.calendar);
        let c = &self.constants;

        RawSeries {
            occupants:                presence::occupancy(ctx),
            sleeping:                 presence::sleeping(ctx),
            lighting_interior:        presence::lighting_interior(ctx, &lighting),
            lighting_garage:          presence::lighting_garage(ctx, &lighting),
            plug_loads_other:         presence::plug_load(ctx, &c.plug_loads_other),
            plug_loads_tv:            presence::plug_load(ctx, &c.plug_loads_tv),
            ceiling_fan:              presence::ceiling_fan(ctx, &c.ceiling_fan, &self.config.ceiling_fan_months),
            hot_water_fixtures,
            hot_water_dishwasher,
            hot_water_clothes_washer,
            dishwasher:               dishwasher.series,
            clothes_washer:           washer.series,
            clothes_dryer:            dryer.series,
            cooking_range:            cooking.series,
            ev,
        }
    }
}

impl RawSeries {
    /// The raw series behind `column`, and whether it is scaled by the timestep
    /// instead of its own maximum.
    fn series(&self, column: Column) -> Option<(&MinuteSeries, bool)> {
        let series = match column {
            Column::Occupants             => &self.occupants,
            Column::Sleeping              => &self.sleeping,
            Column::LightingInterior      => &self.lighting_interior,
            Column::LightingGarage        => &self.lighting_garage,
            Column::PlugLoadsOther        => &self.plug_loads_other,
            Column::PlugLoadsTv           => &self.plug_loads_tv,
            Column::CeilingFan            => &self.ceiling_fan,
            Column::HotWaterFixtures      => &self.hot_water_fixtures,
            Column::HotWaterDishwasher    => &self.hot_water_dishwasher,
            Column::HotWaterClothesWasher => &self.hot_water_clothes_washer,
            Column::Dishwasher            => &self.dishwasher,
            Column::ClothesWasher         => &self.clothes_washer,
            Column::ClothesDryer          => &self.clothes_dryer,
            Column::CookingRange          => &self.cooking_range,
            Column::EvOccupantPresence    => &self.ev.as_ref()?.presence,
            Column::ElectricVehicleCharging => return Some((&self.ev.as_ref()?.charging, true)),
            Column::ElectricVehicleDischarging => {
                return Some((&self.ev.as_ref()?.discharging, true));
            }
            Column::ElectricVehicle => return None,
        };
        Some((series, false))
    }
}
