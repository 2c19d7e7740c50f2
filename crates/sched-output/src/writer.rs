//! The `ScheduleWriter` trait implemented by output backends.

use sched_gen::ScheduleSet;

use crate::OutputResult;

/// Something that can persist a generated [`ScheduleSet`].
pub trait ScheduleWriter {
    /// Write every column of `set`.  On error nothing is written.
    fn write(&mut self, set: &ScheduleSet) -> OutputResult<()>;
}
