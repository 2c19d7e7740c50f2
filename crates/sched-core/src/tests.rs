//! Unit tests for sched-core primitives.

#[cfg(test)]
mod ids {
    use crate::OccupantId;

    #[test]
    fn index_roundtrip() {
        let id = OccupantId(3);
        assert_eq!(id.index(), 3);
        assert_eq!(OccupantId::try_from(3usize).unwrap(), id);
    }

    #[test]
    fn display() {
        assert_eq!(OccupantId(7).to_string(), "OccupantId(7)");
    }
}

#[cfg(test)]
mod calendar {
    use crate::{Calendar, DayType, SLOTS_PER_DAY};

    #[test]
    fn common_and_leap_years() {
        assert_eq!(Calendar::new(2007).unwrap().days(), 365);
        assert_eq!(Calendar::new(2024).unwrap().days(), 366);
        assert_eq!(Calendar::new(2024).unwrap().slots(), 366 * SLOTS_PER_DAY);
        assert_eq!(Calendar::new(2007).unwrap().minutes(), 525_600);
    }

    #[test]
    fn day_type_follows_weekday() {
        // 2007-01-01 was a Monday; Jan 6/7 are the first weekend.
        let cal = Calendar::new(2007).unwrap();
        assert_eq!(cal.day_type(0), DayType::Weekday);
        assert_eq!(cal.day_type(4), DayType::Weekday);
        assert_eq!(cal.day_type(5), DayType::Weekend);
        assert_eq!(cal.day_type(6), DayType::Weekend);
        assert_eq!(cal.day_type(7), DayType::Weekday);
    }

    #[test]
    fn months_and_lengths() {
        let cal = Calendar::new(2024).unwrap();
        assert_eq!(cal.month(0), 0);
        assert_eq!(cal.month(31), 1); // Feb 1
        assert_eq!(cal.days_in_month(1), 29);
        assert_eq!(cal.month(365), 11);
        assert_eq!(cal.month_of_slot(31 * SLOTS_PER_DAY), 1);
        let total: usize = (0..12).map(|m| cal.days_in_month(m)).sum();
        assert_eq!(total, 366);
    }

    #[test]
    fn day_type_parse() {
        assert_eq!(DayType::parse("Weekend"), Some(DayType::Weekend));
        assert_eq!(DayType::parse(" weekday "), Some(DayType::Weekday));
        assert_eq!(DayType::parse("holiday"), None);
    }
}

#[cfg(test)]
mod sampler {
    use crate::sampler::{index_cumulative, index_linear};
    use crate::{RngStreams, Stream, UniformSource, precompute, sample, sample_cumulative};

    /// A uniform source that replays fixed values.
    struct Fixed(Vec<f64>);

    impl UniformSource for Fixed {
        fn uniform(&mut self) -> f64 {
            self.0.remove(0)
        }
    }

    #[test]
    fn precompute_is_prefix_sum() {
        assert_eq!(precompute(&[0.25, 0.25, 0.5]), vec![0.25, 0.5, 1.0]);
        assert!(precompute(&[]).is_empty());
    }

    #[test]
    fn exact_tie_resolves_to_lower_index() {
        let w = [0.25, 0.25, 0.5];
        let c = precompute(&w);
        assert_eq!(index_linear(0.25, &w), 0);
        assert_eq!(index_cumulative(0.25, &c), 0);
        assert_eq!(index_linear(0.2500001, &w), 1);
        assert_eq!(index_cumulative(0.2500001, &c), 1);
    }

    #[test]
    fn rounding_falls_back_to_last_index() {
        let w = [0.3, 0.3, 0.3]; // sums to 0.9
        let c = precompute(&w);
        assert_eq!(index_linear(0.95, &w), 2);
        assert_eq!(index_cumulative(0.95, &c), 2);
    }

    #[test]
    fn zero_weight_entries_are_skipped() {
        let w = [0.0, 0.0, 1.0];
        let c = precompute(&w);
        assert_eq!(index_linear(0.5, &w), 2);
        assert_eq!(index_cumulative(0.5, &c), 2);
    }

    #[test]
    fn both_paths_agree_on_random_draws() {
        let w = [0.05, 0.1, 0.15, 0.2, 0.0, 0.3, 0.2];
        let c = precompute(&w);
        let mut streams = RngStreams::new(Some(9));
        let rng = streams.get_mut(Stream::Main);
        for _ in 0..10_000 {
            let n = rng.uniform();
            assert_eq!(index_linear(n, &w), index_cumulative(n, &c));
        }
    }

    #[test]
    fn sample_consumes_one_draw() {
        let w = [0.5, 0.5];
        let mut src = Fixed(vec![0.1, 0.9]);
        assert_eq!(sample(&mut src, &w), 0);
        assert_eq!(sample_cumulative(&mut src, &precompute(&w)), 1);
        assert!(src.0.is_empty());
    }
}

#[cfg(test)]
mod rng {
    use crate::{OccupantId, OccupantRng, RngStreams, Stream, UniformSource};

    #[test]
    fn deterministic_same_seed() {
        let mut a = RngStreams::new(Some(12345));
        let mut b = RngStreams::new(Some(12345));
        for stream in Stream::ALL {
            for _ in 0..50 {
                assert_eq!(a.get_mut(stream).uniform(), b.get_mut(stream).uniform());
            }
        }
    }

    #[test]
    fn streams_are_independent() {
        // Consuming one stream must not move any other.
        let mut a = RngStreams::new(Some(1));
        let mut b = RngStreams::new(Some(1));
        for _ in 0..1000 {
            a.get_mut(Stream::Dishwasher).uniform();
        }
        assert_eq!(a.get_mut(Stream::Cooking).uniform(), b.get_mut(Stream::Cooking).uniform());
        assert_eq!(a.get_mut(Stream::Main).uniform(), b.get_mut(Stream::Main).uniform());
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = RngStreams::new(Some(1));
        let mut b = RngStreams::new(Some(2));
        assert_ne!(a.get_mut(Stream::Main).uniform(), b.get_mut(Stream::Main).uniform());
    }

    #[test]
    fn unseeded_run_reports_its_seed() {
        let mut a = RngStreams::new(None);
        let mut b = RngStreams::new(Some(a.seed()));
        assert_eq!(a.get_mut(Stream::Ev).uniform(), b.get_mut(Stream::Ev).uniform());
    }

    #[test]
    fn gaussian_respects_floor() {
        let mut streams = RngStreams::new(Some(3));
        let rng = streams.get_mut(Stream::Hygiene);
        for _ in 0..1000 {
            assert!(rng.gaussian(0.0, 5.0, 0.1) >= 0.1);
        }
        assert_eq!(rng.gaussian(2.0, 0.0, 0.1), 2.0);
    }

    #[test]
    fn occupant_rngs_diverge() {
        let mut r0 = OccupantRng::new(1, OccupantId(0));
        let mut r1 = OccupantRng::new(1, OccupantId(1));
        assert_ne!(r0.uniform(), r1.uniform());
    }
}

#[cfg(test)]
mod config {
    use crate::{ScheduleConfig, Vehicle};

    #[test]
    fn default_is_valid() {
        ScheduleConfig::default().validate().unwrap();
    }

    #[test]
    fn occupants_truncate_and_round() {
        let cfg = ScheduleConfig { occupants: 2.6, ..ScheduleConfig::default() };
        assert_eq!(cfg.occupant_count(), 2);
        assert_eq!(cfg.reported_occupants(), 3);
    }

    #[test]
    fn timestep_must_divide_day() {
        let cfg = ScheduleConfig { timestep_minutes: 7, ..ScheduleConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = ScheduleConfig { timestep_minutes: 0, ..ScheduleConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = ScheduleConfig { timestep_minutes: 10, ..ScheduleConfig::default() };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.steps_per_day(), 144);
    }

    #[test]
    fn negative_occupants_rejected() {
        let cfg = ScheduleConfig { occupants: -1.0, ..ScheduleConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn annual_driving_hours() {
        let v = Vehicle { hours_per_week: 7.0 };
        approx::assert_relative_eq!(v.annual_driving_hours(365), 365.0);
    }
}
