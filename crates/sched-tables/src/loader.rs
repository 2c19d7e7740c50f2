//! CSV table loader.
//!
//! # Directory layout
//!
//! [`load_tables_dir`] expects seven files in one directory:
//!
//! | File                     | Columns                                                        |
//! |--------------------------|----------------------------------------------------------------|
//! | `markov_initial.csv`     | `occupancy_type,day_type,<7 state probabilities>`              |
//! | `markov_transition.csv`  | `occupancy_type,day_type,slot,from_state,<7 state probabilities>` |
//! | `activity_duration.csv`  | `occupancy_type,day_type,time_of_day,activity,duration_slots,probability` |
//! | `cluster_size.csv`       | `family,events,probability`                                    |
//! | `event_duration.csv`     | `family,minutes,probability`                                   |
//! | `appliance_power.csv`    | `appliance,kind,row,value` (`kind` = `duration` or `power`)    |
//! | `monthly_shift.csv`      | `region,month,day_type,shift_minutes` (`month` = 1–12)         |
//!
//! The seven state-probability columns are ordered by state id: sleeping,
//! shower, laundry, cooking, dishwashing, absent, idle.  `occupancy_type` is
//! zero-based and `slot` is 0–95 in the tables' own day alignment.
//!
//! ```csv
//! family,events,probability
//! sink,1,0.42
//! sink,2,0.31
//! sink,3,0.27
//! ```
//!
//! Each `read_*` function accepts any `Read` source (pass a
//! `std::io::Cursor` in tests) and feeds a shared [`TablesBuilder`]; all
//! cross-file validation happens once in [`TablesBuilder::build`].

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use sched_core::{DayType, SLOTS_PER_DAY};

use crate::activity::{
    ActivityState, Appliance, DurationActivity, EventFamily, OccupancyType, TimeOfDay,
};
use crate::{ProbabilityTables, TablesBuilder, TablesError, TablesResult};

pub const INITIAL_FILE: &str = "markov_initial.csv";
pub const TRANSITION_FILE: &str = "markov_transition.csv";
pub const ACTIVITY_DURATION_FILE: &str = "activity_duration.csv";
pub const CLUSTER_SIZE_FILE: &str = "cluster_size.csv";
pub const EVENT_DURATION_FILE: &str = "event_duration.csv";
pub const APPLIANCE_POWER_FILE: &str = "appliance_power.csv";
pub const MONTHLY_SHIFT_FILE: &str = "monthly_shift.csv";

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct DurationRecord {
    occupancy_type: usize,
    day_type:       String,
    time_of_day:    String,
    activity:       String,
    duration_slots: f64,
    probability:    f64,
}

#[derive(Deserialize)]
struct ClusterRecord {
    family:      String,
    events:      usize,
    probability: f64,
}

#[derive(Deserialize)]
struct EventDurationRecord {
    family:      String,
    minutes:     f64,
    probability: f64,
}

#[derive(Deserialize)]
struct ApplianceRecord {
    appliance: String,
    kind:      String,
    row:       usize,
    value:     f64,
}

#[derive(Deserialize)]
struct ShiftRecord {
    region:        String,
    month:         usize,
    day_type:      String,
    shift_minutes: i32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate every table from the CSV files in `dir`.
pub fn load_tables_dir(dir: &Path) -> TablesResult<ProbabilityTables> {
    let open = |name: &str| std::fs::File::open(dir.join(name)).map_err(TablesError::Io);

    let mut builder = TablesBuilder::new();
    read_initial(open(INITIAL_FILE)?, &mut builder)?;
    read_transition(open(TRANSITION_FILE)?, &mut builder)?;
    read_activity_duration(open(ACTIVITY_DURATION_FILE)?, &mut builder)?;
    read_cluster_size(open(CLUSTER_SIZE_FILE)?, &mut builder)?;
    read_event_duration(open(EVENT_DURATION_FILE)?, &mut builder)?;
    read_appliance_power(open(APPLIANCE_POWER_FILE)?, &mut builder)?;
    read_monthly_shift(open(MONTHLY_SHIFT_FILE)?, &mut builder)?;

    let tables = builder.build()?;
    debug!(dir = %dir.display(), regions = tables.regions().len(), "probability tables loaded");
    Ok(tables)
}

/// Read start-of-day state probabilities.
pub fn read_initial<R: Read>(reader: R, builder: &mut TablesBuilder) -> TablesResult<()> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    for result in csv_reader.records() {
        let rec = result?;
        expect_len(&rec, 2 + ActivityState::COUNT, INITIAL_FILE)?;
        let occ = parse_occupancy(parse_field(&rec, 0, INITIAL_FILE)?)?;
        let day = parse_day(&rec[1])?;
        builder.initial(occ, day, parse_tail(&rec, 2, INITIAL_FILE)?);
    }
    Ok(())
}

/// Read per-slot transition rows.
pub fn read_transition<R: Read>(reader: R, builder: &mut TablesBuilder) -> TablesResult<()> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    for result in csv_reader.records() {
        let rec = result?;
        expect_len(&rec, 4 + ActivityState::COUNT, TRANSITION_FILE)?;
        let occ = parse_occupancy(parse_field(&rec, 0, TRANSITION_FILE)?)?;
        let day = parse_day(&rec[1])?;
        let slot: usize = parse_field(&rec, 2, TRANSITION_FILE)?;
        if slot >= SLOTS_PER_DAY {
            return Err(TablesError::Parse(format!(
                "{TRANSITION_FILE}: slot {slot} is outside 0..{SLOTS_PER_DAY}"
            )));
        }
        let from = parse_state(&rec[3])?;
        builder.transition(occ, day, slot, from, parse_tail(&rec, 4, TRANSITION_FILE)?);
    }
    Ok(())
}

/// Read activity-duration distributions (long format).
pub fn read_activity_duration<R: Read>(reader: R, builder: &mut TablesBuilder) -> TablesResult<()> {
    type Key = (OccupancyType, DayType, TimeOfDay, DurationActivity);
    let mut groups: HashMap<Key, (Vec<f64>, Vec<f64>)> = HashMap::new();

    let mut csv_reader = csv::Reader::from_reader(reader);
    for result in csv_reader.deserialize::<DurationRecord>() {
        let row = result.map_err(|e| TablesError::Parse(e.to_string()))?;
        let tod = TimeOfDay::parse(&row.time_of_day).ok_or_else(|| {
            TablesError::Parse(format!("invalid time_of_day {:?}", row.time_of_day))
        })?;
        let act = DurationActivity::parse(&row.activity).ok_or_else(|| {
            TablesError::Parse(format!(
                "invalid activity {:?}: expected shower, laundry, cooking, or dishwashing",
                row.activity
            ))
        })?;
        let key = (parse_occupancy(row.occupancy_type)?, parse_day(&row.day_type)?, tod, act);
        let entry = groups.entry(key).or_default();
        entry.0.push(row.duration_slots);
        entry.1.push(row.probability);
    }

    for ((occ, day, tod, act), (durations, probs)) in groups {
        builder.activity_duration(occ, day, tod, act, durations, probs);
    }
    Ok(())
}

/// Read cluster-size probabilities.  `events` must run 1, 2, … per family.
pub fn read_cluster_size<R: Read>(reader: R, builder: &mut TablesBuilder) -> TablesResult<()> {
    let mut groups: HashMap<EventFamily, Vec<(usize, f64)>> = HashMap::new();

    let mut csv_reader = csv::Reader::from_reader(reader);
    for result in csv_reader.deserialize::<ClusterRecord>() {
        let row = result.map_err(|e| TablesError::Parse(e.to_string()))?;
        groups
            .entry(parse_family(&row.family)?)
            .or_default()
            .push((row.events, row.probability));
    }

    for (family, mut sizes) in groups {
        sizes.sort_unstable_by_key(|&(events, _)| events);
        if let Some((i, &(events, _))) =
            sizes.iter().enumerate().find(|&(i, &(events, _))| events != i + 1)
        {
            return Err(TablesError::Parse(format!(
                "{CLUSTER_SIZE_FILE}: {family} cluster sizes must be contiguous from 1; \
                 entry {i} has events = {events}"
            )));
        }
        builder.cluster_size(family, sizes.into_iter().map(|(_, p)| p).collect());
    }
    Ok(())
}

/// Read sub-event duration distributions (minutes).
pub fn read_event_duration<R: Read>(reader: R, builder: &mut TablesBuilder) -> TablesResult<()> {
    let mut groups: HashMap<EventFamily, (Vec<f64>, Vec<f64>)> = HashMap::new();

    let mut csv_reader = csv::Reader::from_reader(reader);
    for result in csv_reader.deserialize::<EventDurationRecord>() {
        let row = result.map_err(|e| TablesError::Parse(e.to_string()))?;
        let entry = groups.entry(parse_family(&row.family)?).or_default();
        entry.0.push(row.minutes);
        entry.1.push(row.probability);
    }

    for (family, (minutes, probs)) in groups {
        builder.event_duration(family, minutes, probs);
    }
    Ok(())
}

/// Read appliance duration and power rows (long format).
pub fn read_appliance_power<R: Read>(reader: R, builder: &mut TablesBuilder) -> TablesResult<()> {
    // (appliance, is_power, row) → values; BTreeMap keeps row order stable.
    let mut rows: BTreeMap<(usize, bool, usize), Vec<f64>> = BTreeMap::new();

    let mut csv_reader = csv::Reader::from_reader(reader);
    for result in csv_reader.deserialize::<ApplianceRecord>() {
        let row = result.map_err(|e| TablesError::Parse(e.to_string()))?;
        let appliance = Appliance::parse(&row.appliance).ok_or_else(|| {
            TablesError::Parse(format!("invalid appliance {:?}", row.appliance))
        })?;
        let is_power = match row.kind.trim() {
            "duration" => false,
            "power" => true,
            other => {
                return Err(TablesError::Parse(format!(
                    "invalid kind {other:?}: expected \"duration\" or \"power\""
                )));
            }
        };
        rows.entry((appliance.index(), is_power, row.row)).or_default().push(row.value);
    }

    for ((idx, is_power, _), values) in rows {
        let appliance = Appliance::ALL[idx];
        if is_power {
            builder.appliance_power_row(appliance, values);
        } else {
            builder.appliance_duration_row(appliance, values);
        }
    }
    Ok(())
}

/// Read monthly lead-time shifts.
pub fn read_monthly_shift<R: Read>(reader: R, builder: &mut TablesBuilder) -> TablesResult<()> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    for result in csv_reader.deserialize::<ShiftRecord>() {
        let row = result.map_err(|e| TablesError::Parse(e.to_string()))?;
        if !(1..=12).contains(&row.month) {
            return Err(TablesError::Parse(format!(
                "{MONTHLY_SHIFT_FILE}: month {} is outside 1..=12",
                row.month
            )));
        }
        builder.monthly_shift(
            row.region.trim(),
            row.month - 1,
            parse_day(&row.day_type)?,
            row.shift_minutes,
        );
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn expect_len(rec: &csv::StringRecord, n: usize, file: &str) -> TablesResult<()> {
    if rec.len() != n {
        return Err(TablesError::Parse(format!(
            "{file}: expected {n} columns, found {} in {:?}",
            rec.len(),
            rec
        )));
    }
    Ok(())
}

fn parse_field<T: FromStr>(rec: &csv::StringRecord, idx: usize, file: &str) -> TablesResult<T> {
    let raw = rec[idx].trim();
    raw.parse::<T>()
        .map_err(|_| TablesError::Parse(format!("{file}: cannot parse column {idx} value {raw:?}")))
}

fn parse_tail(rec: &csv::StringRecord, from: usize, file: &str) -> TablesResult<Vec<f64>> {
    (from..rec.len()).map(|i| parse_field(rec, i, file)).collect()
}

fn parse_occupancy(i: usize) -> TablesResult<OccupancyType> {
    OccupancyType::new(i).ok_or_else(|| {
        TablesError::Parse(format!(
            "occupancy_type {i} is outside 0..{}",
            OccupancyType::COUNT
        ))
    })
}

fn parse_day(s: &str) -> TablesResult<DayType> {
    DayType::parse(s).ok_or_else(|| {
        TablesError::Parse(format!("invalid day_type {s:?}: expected \"weekday\" or \"weekend\""))
    })
}

fn parse_state(s: &str) -> TablesResult<ActivityState> {
    if let Ok(i) = s.trim().parse::<usize>() {
        return ActivityState::from_index(i)
            .ok_or_else(|| TablesError::Parse(format!("state id {i} is outside 0..7")));
    }
    ActivityState::parse(s).ok_or_else(|| TablesError::Parse(format!("invalid state {s:?}")))
}

fn parse_family(s: &str) -> TablesResult<EventFamily> {
    EventFamily::parse(s).ok_or_else(|| {
        TablesError::Parse(format!(
            "invalid family {s:?}: expected sink, shower, clothes_washer, or dishwasher"
        ))
    })
}
