//! Generation results.

use sched_core::OccupantId;

use crate::Column;

/// What a run used and how the EV allocation went.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    /// Root seed actually used (drawn from entropy when none was given).
    pub seed:                 u64,
    /// Occupant count as reported (rounded).
    pub occupants:            u32,
    pub ev_occupant:          Option<OccupantId>,
    pub ev_shortfall_minutes: f64,
}

/// Output columns of one run, in request order.
#[derive(Clone, Debug)]
pub struct ScheduleSet {
    pub(crate) columns:          Vec<(Column, Vec<f64>)>,
    pub(crate) timestep_minutes: u32,
    pub(crate) report:           RunReport,
}

impl ScheduleSet {
    /// Assemble a set directly (columns must share one length).
    pub fn new(columns: Vec<(Column, Vec<f64>)>, timestep_minutes: u32, report: RunReport) -> Self {
        debug_assert!(columns.windows(2).all(|w| w[0].1.len() == w[1].1.len()));
        Self { columns, timestep_minutes, report }
    }

    pub fn columns(&self) -> &[(Column, Vec<f64>)] {
        &self.columns
    }

    pub fn get(&self, column: Column) -> Option<&[f64]> {
        self.columns.iter().find(|(c, _)| *c == column).map(|(_, v)| v.as_slice())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(c, _)| c.as_str()).collect()
    }

    /// Rows per column (timesteps in the year).
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, v)| v.len())
    }

    pub fn timestep_minutes(&self) -> u32 {
        self.timestep_minutes
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }
}

/// Result of [`ScheduleGenerator::generate`][crate::ScheduleGenerator::generate].
#[derive(Clone, Debug)]
pub enum Outcome {
    Generated(ScheduleSet),
    /// Zero occupants: nothing was simulated and nothing should be written.
    NoOccupants,
}

impl Outcome {
    pub fn schedules(&self) -> Option<&ScheduleSet> {
        match self {
            Outcome::Generated(set) => Some(set),
            Outcome::NoOccupants => None,
        }
    }

    pub fn into_schedules(self) -> Option<ScheduleSet> {
        match self {
            Outcome::Generated(set) => Some(set),
            Outcome::NoOccupants => None,
        }
    }
}
