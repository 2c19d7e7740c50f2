//! Typed table keys: activity states, occupancy types, time-of-day buckets,
//! event families, and appliances.
//!
//! # State metadata
//!
//! The seven Markov states are mutually exclusive; exactly one is active per
//! occupant per 15-minute slot.  Four of them carry an empirical duration
//! table, the rest always last a single slot:
//!
//! | id | state       | duration table |
//! |----|-------------|----------------|
//! | 0  | sleeping    | none           |
//! | 1  | shower      | `shower`       |
//! | 2  | laundry     | `laundry`      |
//! | 3  | cooking     | `cooking`      |
//! | 4  | dishwashing | `dishwashing`  |
//! | 5  | absent      | none           |
//! | 6  | idle        | none           |
//!
//! The mapping lives in one lookup table ([`STATE_INFO`]) rather than in
//! conditional chains at every call site.

use std::fmt;

use sched_core::{UniformSource, sample};

// ── DurationActivity ──────────────────────────────────────────────────────────

/// The activities that have an empirical duration distribution.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum DurationActivity {
    Shower,
    Laundry,
    Cooking,
    Dishwashing,
}

impl DurationActivity {
    pub const ALL: [DurationActivity; 4] = [
        DurationActivity::Shower,
        DurationActivity::Laundry,
        DurationActivity::Cooking,
        DurationActivity::Dishwashing,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn state(self) -> ActivityState {
        match self {
            DurationActivity::Shower      => ActivityState::Shower,
            DurationActivity::Laundry     => ActivityState::Laundry,
            DurationActivity::Cooking     => ActivityState::Cooking,
            DurationActivity::Dishwashing => ActivityState::Dishwashing,
        }
    }

    pub fn parse(s: &str) -> Option<DurationActivity> {
        ActivityState::parse(s).and_then(ActivityState::duration_activity)
    }
}

// ── ActivityState ─────────────────────────────────────────────────────────────

/// Static metadata for one activity state.
#[derive(Debug)]
pub struct StateInfo {
    pub name:     &'static str,
    pub duration: Option<DurationActivity>,
}

/// State id → metadata.
pub const STATE_INFO: [StateInfo; ActivityState::COUNT] = [
    StateInfo { name: "sleeping",    duration: None },
    StateInfo { name: "shower",      duration: Some(DurationActivity::Shower) },
    StateInfo { name: "laundry",     duration: Some(DurationActivity::Laundry) },
    StateInfo { name: "cooking",     duration: Some(DurationActivity::Cooking) },
    StateInfo { name: "dishwashing", duration: Some(DurationActivity::Dishwashing) },
    StateInfo { name: "absent",      duration: None },
    StateInfo { name: "idle",        duration: None },
];

/// One of the seven mutually exclusive occupant activity states.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum ActivityState {
    Sleeping    = 0,
    Shower      = 1,
    Laundry     = 2,
    Cooking     = 3,
    Dishwashing = 4,
    Absent      = 5,
    /// At home, awake, and not doing any of the tracked activities.
    Idle        = 6,
}

impl ActivityState {
    pub const COUNT: usize = 7;

    pub const ALL: [ActivityState; Self::COUNT] = [
        ActivityState::Sleeping,
        ActivityState::Shower,
        ActivityState::Laundry,
        ActivityState::Cooking,
        ActivityState::Dishwashing,
        ActivityState::Absent,
        ActivityState::Idle,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Option<ActivityState> {
        Self::ALL.get(i).copied()
    }

    #[inline]
    pub fn info(self) -> &'static StateInfo {
        &STATE_INFO[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// The duration table key, or `None` for single-slot states.
    #[inline]
    pub fn duration_activity(self) -> Option<DurationActivity> {
        self.info().duration
    }

    /// Look a state up by name (`"idle"` also accepts `"nothing_at_home"`).
    pub fn parse(s: &str) -> Option<ActivityState> {
        let s = s.trim().to_ascii_lowercase();
        if s == "nothing_at_home" {
            return Some(ActivityState::Idle);
        }
        Self::ALL.into_iter().find(|st| st.name() == s)
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── OccupancyType ─────────────────────────────────────────────────────────────

/// Behavioural cluster an occupant belongs to; selects the Markov tables.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct OccupancyType(u8);

impl OccupancyType {
    pub const COUNT: usize = 4;

    /// Population share of each occupancy type.
    pub const WEIGHTS: [f64; Self::COUNT] = [0.381, 0.297, 0.165, 0.157];

    /// `None` if `i >= COUNT`.
    pub fn new(i: usize) -> Option<OccupancyType> {
        (i < Self::COUNT).then_some(OccupancyType(i as u8))
    }

    pub fn all() -> impl Iterator<Item = OccupancyType> {
        (0..Self::COUNT as u8).map(OccupancyType)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Draw a type from [`OccupancyType::WEIGHTS`] (one uniform draw).
    pub fn sample<R: UniformSource + ?Sized>(rng: &mut R) -> OccupancyType {
        OccupancyType(sample(rng, &Self::WEIGHTS) as u8)
    }
}

impl fmt::Display for OccupancyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type{}", self.0)
    }
}

// ── TimeOfDay ─────────────────────────────────────────────────────────────────

/// Hour bucket used to key activity-duration tables.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TimeOfDay {
    /// Hours 0–7.
    Morning,
    /// Hours 8–15.
    Midday,
    /// Hours 16–23.
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Midday, TimeOfDay::Evening];

    pub fn from_hour(hour: usize) -> TimeOfDay {
        match hour {
            0..=7 => TimeOfDay::Morning,
            8..=15 => TimeOfDay::Midday,
            _ => TimeOfDay::Evening,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Midday  => "midday",
            TimeOfDay::Evening => "evening",
        }
    }

    pub fn parse(s: &str) -> Option<TimeOfDay> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

// ── EventFamily ───────────────────────────────────────────────────────────────

/// Water-draw families with cluster-size and event-duration tables.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EventFamily {
    Sink,
    Shower,
    ClothesWasher,
    Dishwasher,
}

impl EventFamily {
    pub const ALL: [EventFamily; 4] = [
        EventFamily::Sink,
        EventFamily::Shower,
        EventFamily::ClothesWasher,
        EventFamily::Dishwasher,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventFamily::Sink          => "sink",
            EventFamily::Shower        => "shower",
            EventFamily::ClothesWasher => "clothes_washer",
            EventFamily::Dishwasher    => "dishwasher",
        }
    }

    pub fn parse(s: &str) -> Option<EventFamily> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

impl fmt::Display for EventFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Appliance ─────────────────────────────────────────────────────────────────

/// Appliances with joint duration/power distributions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Appliance {
    Dishwasher,
    ClothesWasher,
    ClothesDryer,
    CookingRange,
}

impl Appliance {
    pub const ALL: [Appliance; 4] = [
        Appliance::Dishwasher,
        Appliance::ClothesWasher,
        Appliance::ClothesDryer,
        Appliance::CookingRange,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Appliance::Dishwasher    => "dishwasher",
            Appliance::ClothesWasher => "clothes_washer",
            Appliance::ClothesDryer  => "clothes_dryer",
            Appliance::CookingRange  => "cooking_range",
        }
    }

    pub fn parse(s: &str) -> Option<Appliance> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

impl fmt::Display for Appliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
