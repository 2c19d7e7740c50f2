//! Tests for sched-gen.

use approx::assert_relative_eq;
use sched_core::{OccupantId, ScheduleConfig, Vehicle};
use sched_markov::ActivityMatrix;
use sched_tables::{ProbabilityTables, synthetic_tables};

use crate::{
    Column, GenError, GenerationObserver, GeneratorBuilder, NoopObserver, Outcome, RunReport,
    ScheduleSet,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn tables() -> ProbabilityTables {
    synthetic_tables().unwrap()
}

fn config(seed: Option<u64>) -> ScheduleConfig {
    ScheduleConfig {
        occupants: 3.0,
        seed,
        vehicle: Some(Vehicle::default()),
        ..ScheduleConfig::default()
    }
}

fn generate(tables: &ProbabilityTables, config: ScheduleConfig, columns: Option<Vec<Column>>) -> ScheduleSet {
    let mut builder = GeneratorBuilder::new(config, tables);
    if let Some(c) = columns {
        builder = builder.columns(c);
    }
    builder
        .build()
        .unwrap()
        .generate(&mut NoopObserver)
        .unwrap()
        .into_schedules()
        .unwrap()
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

// ── Column ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod column_tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for c in Column::ALL {
            assert_eq!(Column::parse(c.as_str()).unwrap(), c);
        }
        assert_eq!("hot_water_fixtures".parse::<Column>().unwrap(), Column::HotWaterFixtures);
    }

    #[test]
    fn unknown_name_lists_valid_ones() {
        let err = Column::parse("jacuzzi").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("jacuzzi"));
        assert!(msg.contains("occupants"));
        assert!(msg.contains("electric_vehicle_discharging"));
    }

    #[test]
    fn parse_list_fails_on_first_unknown() {
        assert!(Column::parse_list(&["occupants", "sauna"]).is_err());
        assert_eq!(
            Column::parse_list(&["occupants", "dishwasher"]).unwrap(),
            vec![Column::Occupants, Column::Dishwasher]
        );
    }

    #[test]
    fn default_set_follows_building() {
        let mut cfg = ScheduleConfig::default();
        cfg.appliances.dishwasher = false;
        let set = Column::default_set(&cfg);
        assert!(!set.contains(&Column::Dishwasher));
        assert!(!set.contains(&Column::HotWaterDishwasher));
        assert!(!set.contains(&Column::ElectricVehicle));
        assert!(!set.contains(&Column::Sleeping));
        assert!(set.contains(&Column::HotWaterFixtures));

        cfg.debug = true;
        cfg.vehicle = Some(Vehicle::default());
        let set = Column::default_set(&cfg);
        assert!(set.contains(&Column::Sleeping));
        assert!(set.contains(&Column::EvOccupantPresence));
        assert!(set.contains(&Column::ElectricVehicle));
    }
}

// ── Post-processing ───────────────────────────────────────────────────────────

#[cfg(test)]
mod postprocess_tests {
    use super::*;
    use crate::PostProcessor;
    use crate::postprocess::{aggregate, draw_offset, normalize, roll};
    use sched_core::{Calendar, StreamRng};

    #[test]
    fn roll_wraps_both_ways() {
        let mut v = vec![1.0, 2.0, 3.0, 4.0];
        roll(&mut v, 1);
        assert_eq!(v, [4.0, 1.0, 2.0, 3.0]);
        roll(&mut v, -2);
        assert_eq!(v, [2.0, 3.0, 4.0, 1.0]);
        roll(&mut v, 8);
        assert_eq!(v, [2.0, 3.0, 4.0, 1.0]);
    }

    #[test]
    fn aggregate_sums_blocks() {
        assert_eq!(aggregate(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3), vec![6.0, 15.0]);
    }

    #[test]
    fn normalize_by_own_max_or_given_value() {
        let mut v = vec![1.0, 4.0, 2.0];
        normalize(&mut v, None);
        assert_eq!(v, [0.25, 1.0, 0.5]);

        let mut v = vec![30.0, 60.0];
        normalize(&mut v, Some(60.0));
        assert_eq!(v, [0.5, 1.0]);
    }

    #[test]
    fn all_zero_series_is_left_alone() {
        let mut v = vec![0.0; 5];
        normalize(&mut v, None);
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn offset_stays_within_half_hour() {
        let mut rng = StreamRng::from_seed(3);
        for _ in 0..1000 {
            let o = draw_offset(&mut rng);
            assert!((-30..30).contains(&o));
        }
    }

    #[test]
    fn shift_applies_offset_then_day_rotation() {
        let cal = Calendar::new(2007).unwrap();
        let mut shifts = [[0i32; 2]; 12];
        // 2007-01-01 is a Monday.
        shifts[0][0] = 60;
        let post = PostProcessor::new(&cal, shifts, 60, 5);

        // +5 for the run offset, then 60 minutes earlier for the Monday lead.
        let mut raw = vec![0.0; cal.minutes()];
        raw[100] = 1.0;
        let shifted = post.shift(&raw);
        assert_eq!(shifted[45], 1.0);
        assert_relative_eq!(shifted.iter().sum::<f64>(), 1.0);

        let out = post.random_shift_and_normalize(&raw, None);
        assert_eq!(out.len(), 365 * 24);
        assert_eq!(out[0], 1.0);
    }

    #[test]
    fn day_rotation_wraps_inside_the_day() {
        let cal = Calendar::new(2007).unwrap();
        let mut shifts = [[0i32; 2]; 12];
        shifts[0][0] = 30;
        let post = PostProcessor::new(&cal, shifts, 60, 0);

        let mut raw = vec![0.0; cal.minutes()];
        raw[10] = 1.0;
        let shifted = post.shift(&raw);
        assert_eq!(shifted[1420], 1.0);
        assert_eq!(shifted[1440 + 1420], 0.0);
    }

    #[test]
    fn positive_lead_moves_events_earlier() {
        let cal = Calendar::new(2007).unwrap();
        let mut shifts = [[0i32; 2]; 12];
        shifts[0][0] = 60;
        let post = PostProcessor::new(&cal, shifts, 1, 0);

        let mut raw = vec![0.0; cal.minutes()];
        raw[600] = 1.0;
        let shifted = post.shift(&raw);
        assert_eq!(shifted[540], 1.0);
        assert_eq!(shifted[660], 0.0);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let t = tables();
        let g = GeneratorBuilder::new(ScheduleConfig::default(), &t).build().unwrap();
        assert!(!g.columns().is_empty());
        assert_eq!(g.calendar().days(), 365);
    }

    #[test]
    fn unknown_region_is_rejected() {
        let t = tables();
        let mut cfg = ScheduleConfig::default();
        cfg.location.region = "ATLANTIS".to_string();
        let err = GeneratorBuilder::new(cfg, &t).build().err().unwrap();
        assert!(matches!(err, GenError::UnknownRegion { .. }));
        assert!(err.to_string().contains("CO"));
    }

    #[test]
    fn bad_timestep_is_rejected() {
        let t = tables();
        let cfg = ScheduleConfig { timestep_minutes: 7, ..ScheduleConfig::default() };
        let err = GeneratorBuilder::new(cfg, &t).build().err().unwrap();
        assert!(matches!(err, GenError::Config(_)));
    }

    #[test]
    fn debug_column_needs_debug_flag() {
        let t = tables();
        let err = GeneratorBuilder::new(ScheduleConfig::default(), &t)
            .columns(vec![Column::Sleeping])
            .build()
            .err()
            .unwrap();
        assert!(err.to_string().contains("sleeping"));
    }

    #[test]
    fn ev_column_needs_vehicle() {
        let t = tables();
        let err = GeneratorBuilder::new(ScheduleConfig::default(), &t)
            .columns(vec![Column::ElectricVehicleCharging])
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, GenError::UnavailableColumn { column: "electric_vehicle_charging", .. }));
    }

    #[test]
    fn absent_device_column_is_rejected() {
        let t = tables();
        let mut cfg = ScheduleConfig::default();
        cfg.appliances.dishwasher = false;
        for column in [Column::Dishwasher, Column::HotWaterDishwasher] {
            let err = GeneratorBuilder::new(cfg.clone(), &t)
                .columns(vec![Column::Occupants, column])
                .build()
                .err()
                .unwrap();
            assert!(matches!(err, GenError::UnavailableColumn { column: c, .. } if c == column.as_str()));
            assert!(err.to_string().contains("not present"));
        }

        let g = GeneratorBuilder::new(cfg, &t)
            .columns(vec![Column::ClothesWasher, Column::HotWaterClothesWasher])
            .build()
            .unwrap();
        assert_eq!(g.columns().len(), 2);
    }

    #[test]
    fn invalid_constants_are_rejected() {
        let t = tables();
        let mut c = sched_enduse::EndUseConstants::default();
        c.shower.bath_ratio = -0.1;
        let err = GeneratorBuilder::new(ScheduleConfig::default(), &t)
            .constants(c)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, GenError::Constants(_)));
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generate_tests {
    use super::*;

    #[test]
    fn zero_occupants_produce_no_schedules() {
        let t = tables();
        let cfg = ScheduleConfig { occupants: 0.4, ..ScheduleConfig::default() };
        let outcome = GeneratorBuilder::new(cfg, &t).build().unwrap().generate(&mut NoopObserver).unwrap();
        assert!(matches!(outcome, Outcome::NoOccupants));
    }

    #[test]
    fn same_seed_identical_output() {
        let t = tables();
        let a = generate(&t, config(Some(1)), None);
        let b = generate(&t, config(Some(1)), None);
        assert_eq!(a.names(), b.names());
        for ((_, x), (_, y)) in a.columns().iter().zip(b.columns()) {
            assert_eq!(x, y);
        }
        assert_eq!(a.report(), b.report());
    }

    #[test]
    fn different_seeds_differ() {
        let t = tables();
        let a = generate(&t, config(Some(1)), None);
        let b = generate(&t, config(Some(2)), None);
        assert_ne!(a.get(Column::Occupants), b.get(Column::Occupants));
    }

    #[test]
    fn unseeded_run_reports_its_seed() {
        let t = tables();
        let a = generate(&t, config(None), None);
        let mut cfg = config(None);
        cfg.seed = Some(a.report().seed);
        let b = generate(&t, cfg, None);
        assert_eq!(a.get(Column::HotWaterFixtures), b.get(Column::HotWaterFixtures));
    }

    #[test]
    fn columns_are_normalized() {
        let t = tables();
        let set = generate(&t, config(Some(1)), None);
        assert_eq!(set.rows(), 365 * 24);
        for (column, values) in set.columns() {
            assert_eq!(values.len(), 365 * 24, "{column}");
            match column {
                Column::ElectricVehicle => {
                    assert!(values.iter().all(|v| (-1.0..=1.0).contains(v)), "{column}");
                }
                Column::ElectricVehicleCharging | Column::ElectricVehicleDischarging => {
                    assert!(values.iter().all(|v| (0.0..=1.0 + 1e-12).contains(v)), "{column}");
                }
                _ => {
                    assert!(values.iter().all(|&v| v >= 0.0), "{column}");
                    assert_relative_eq!(max(values), 1.0, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn requested_set_does_not_change_values() {
        let t = tables();
        let all = generate(&t, config(Some(9)), None);
        let few = generate(&t, config(Some(9)), Some(vec![Column::ClothesDryer, Column::HotWaterFixtures]));
        assert_eq!(few.names(), ["clothes_dryer", "hot_water_fixtures"]);
        assert_eq!(all.get(Column::ClothesDryer), few.get(Column::ClothesDryer));
        assert_eq!(all.get(Column::HotWaterFixtures), few.get(Column::HotWaterFixtures));
    }

    #[test]
    fn removing_the_vehicle_keeps_other_columns() {
        let t = tables();
        let with = generate(&t, config(Some(4)), None);
        let mut cfg = config(Some(4));
        cfg.vehicle = None;
        let without = generate(&t, cfg, None);
        assert!(without.get(Column::ElectricVehicle).is_none());
        assert_eq!(with.get(Column::CookingRange), without.get(Column::CookingRange));
        assert_eq!(with.get(Column::Dishwasher), without.get(Column::Dishwasher));
        assert!(with.report().ev_occupant.is_some());
        assert!(without.report().ev_occupant.is_none());
    }

    #[test]
    fn observer_sees_every_stage() {
        #[derive(Default)]
        struct Recorder {
            occupants: Vec<OccupantId>,
            columns:   Vec<Column>,
            warnings:  usize,
            reports:   usize,
        }
        impl GenerationObserver for Recorder {
            fn on_occupant(&mut self, id: OccupantId, _m: &ActivityMatrix) {
                self.occupants.push(id);
            }
            fn on_column(&mut self, column: Column, _v: &[f64]) {
                self.columns.push(column);
            }
            fn on_warning(&mut self, _m: &str) {
                self.warnings += 1;
            }
            fn on_run_end(&mut self, _r: &RunReport) {
                self.reports += 1;
            }
        }

        let t = tables();
        let cfg = ScheduleConfig { occupants: 2.5, seed: Some(5), ..ScheduleConfig::default() };
        let g = GeneratorBuilder::new(cfg, &t)
            .columns(vec![Column::Occupants, Column::LightingInterior])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        let set = g.generate(&mut rec).unwrap().into_schedules().unwrap();

        assert_eq!(rec.occupants, vec![OccupantId(0), OccupantId(1)]);
        assert_eq!(rec.columns, vec![Column::Occupants, Column::LightingInterior]);
        assert_eq!(rec.warnings, 1);
        assert_eq!(rec.reports, 1);
        assert_eq!(set.report().occupants, 3);
    }

    #[test]
    fn finer_timestep_gives_more_rows() {
        let t = tables();
        let cfg = ScheduleConfig { timestep_minutes: 15, ..config(Some(1)) };
        let set = generate(&t, cfg, Some(vec![Column::Occupants]));
        assert_eq!(set.rows(), 365 * 96);
        assert_eq!(set.timestep_minutes(), 15);
    }
}
