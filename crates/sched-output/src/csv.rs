//! CSV output backend.
//!
//! One header row of column names, then one row per timestep.  Values are
//! written to three significant figures.  In append mode the new columns
//! are added to the right of an existing file, which must already hold
//! exactly one row per timestep plus its header.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{Reader, StringRecord, Writer};
use sched_gen::ScheduleSet;
use tracing::debug;

use crate::writer::ScheduleWriter;
use crate::{OutputError, OutputResult};

/// How [`CsvScheduleWriter`] treats an existing file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Create or truncate.
    #[default]
    Create,
    /// Add columns to an existing file with matching row count.
    Append,
}

/// Writes schedules to a single CSV file.
pub struct CsvScheduleWriter {
    path: PathBuf,
    mode: WriteMode,
}

impl CsvScheduleWriter {
    pub fn new(path: impl Into<PathBuf>, mode: WriteMode) -> Self {
        Self { path: path.into(), mode }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Existing rows (header first), checked against `expected` lines.
    fn read_existing(&self, expected: usize) -> OutputResult<Vec<StringRecord>> {
        let file = File::open(&self.path)?;
        let mut rdr = Reader::from_reader(BufReader::new(file));
        let mut rows = vec![rdr.headers()?.clone()];
        for record in rdr.records() {
            rows.push(record?);
        }
        if rows.len() != expected {
            return Err(OutputError::RowCountMismatch {
                path: self.path.clone(),
                expected,
                actual: rows.len(),
            });
        }
        Ok(rows)
    }
}

impl ScheduleWriter for CsvScheduleWriter {
    fn write(&mut self, set: &ScheduleSet) -> OutputResult<()> {
        let expected = set.rows() + 1;
        let mut rows = match self.mode {
            WriteMode::Create => vec![StringRecord::new(); expected],
            WriteMode::Append => self.read_existing(expected)?,
        };

        for name in set.names() {
            rows[0].push_field(name);
        }
        for (_, values) in set.columns() {
            for (row, &v) in rows[1..].iter_mut().zip(values) {
                row.push_field(&format_sig3(v));
            }
        }

        let mut w = Writer::from_path(&self.path)?;
        for row in &rows {
            w.write_record(row)?;
        }
        w.flush()?;

        debug!(
            path = %self.path.display(),
            mode = ?self.mode,
            columns = set.columns().len(),
            rows = set.rows(),
            "schedules written"
        );
        Ok(())
    }
}

/// Format `v` to three significant figures, dropping trailing zeros.
///
/// Very small or large magnitudes use exponent notation.
pub fn format_sig3(v: f64) -> String {
    if v == 0.0 || !v.is_finite() {
        return if v == 0.0 { "0".to_string() } else { v.to_string() };
    }
    let exp = v.abs().log10().floor() as i32;
    if !(-4..3).contains(&exp) {
        return format!("{v:.2e}");
    }
    let decimals = (2 - exp).max(0) as usize;
    let s = format!("{v:.decimals$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
