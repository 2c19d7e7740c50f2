//! Tests for sched-output.

#[cfg(test)]
mod format_tests {
    use crate::format_sig3;

    #[test]
    fn three_significant_figures() {
        assert_eq!(format_sig3(0.0), "0");
        assert_eq!(format_sig3(1.0), "1");
        assert_eq!(format_sig3(0.123456), "0.123");
        assert_eq!(format_sig3(0.5), "0.5");
        assert_eq!(format_sig3(12.345), "12.3");
        assert_eq!(format_sig3(-0.98765), "-0.988");
        assert_eq!(format_sig3(0.0012345), "0.00123");
        assert_eq!(format_sig3(0.99996), "1");
    }

    #[test]
    fn extreme_magnitudes_use_exponents() {
        assert_eq!(format_sig3(0.0000123), "1.23e-5");
        assert_eq!(format_sig3(12345.0), "1.23e4");
    }
}

#[cfg(test)]
mod csv_tests {
    use std::fs;

    use sched_gen::{Column, RunReport, ScheduleSet};
    use tempfile::TempDir;

    use crate::{CsvScheduleWriter, OutputError, ScheduleWriter, WriteMode};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn report() -> RunReport {
        RunReport { seed: 1, occupants: 2, ev_occupant: None, ev_shortfall_minutes: 0.0 }
    }

    fn set(columns: Vec<(Column, Vec<f64>)>) -> ScheduleSet {
        ScheduleSet::new(columns, 60, report())
    }

    fn read(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr
            .records()
            .map(|r| r.unwrap().iter().map(str::to_owned).collect())
            .collect();
        (headers, rows)
    }

    #[test]
    fn create_writes_header_and_rows() {
        let dir = tmp();
        let path = dir.path().join("schedules.csv");
        let s = set(vec![
            (Column::Occupants, vec![1.0, 0.5, 0.25]),
            (Column::HotWaterFixtures, vec![0.0, 0.123456, 1.0]),
        ]);
        CsvScheduleWriter::new(&path, WriteMode::Create).write(&s).unwrap();

        let (headers, rows) = read(&path);
        assert_eq!(headers, ["occupants", "hot_water_fixtures"]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], ["0.5", "0.123"]);
    }

    #[test]
    fn round_trip_within_rounding() {
        let dir = tmp();
        let path = dir.path().join("schedules.csv");
        let values = vec![0.318_309, 0.707_106, 0.999, 0.014_142];
        let s = set(vec![(Column::LightingInterior, values.clone())]);
        CsvScheduleWriter::new(&path, WriteMode::Create).write(&s).unwrap();

        let (_, rows) = read(&path);
        for (row, v) in rows.iter().zip(&values) {
            let back: f64 = row[0].parse().unwrap();
            assert!((back - v).abs() <= v.abs() * 5e-3);
        }
    }

    #[test]
    fn append_adds_columns() {
        let dir = tmp();
        let path = dir.path().join("schedules.csv");
        let first = set(vec![(Column::Occupants, vec![1.0, 0.5])]);
        CsvScheduleWriter::new(&path, WriteMode::Create).write(&first).unwrap();

        let second = set(vec![(Column::CookingRange, vec![0.25, 1.0])]);
        CsvScheduleWriter::new(&path, WriteMode::Append).write(&second).unwrap();

        let (headers, rows) = read(&path);
        assert_eq!(headers, ["occupants", "cooking_range"]);
        assert_eq!(rows[0], ["1", "0.25"]);
        assert_eq!(rows[1], ["0.5", "1"]);
    }

    #[test]
    fn append_with_wrong_row_count_fails_and_writes_nothing() {
        let dir = tmp();
        let path = dir.path().join("schedules.csv");
        let first = set(vec![(Column::Occupants, vec![1.0, 0.5, 0.2])]);
        CsvScheduleWriter::new(&path, WriteMode::Create).write(&first).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let second = set(vec![(Column::CookingRange, vec![0.25, 1.0])]);
        let err = CsvScheduleWriter::new(&path, WriteMode::Append).write(&second).unwrap_err();
        match &err {
            OutputError::RowCountMismatch { expected, actual, .. } => {
                assert_eq!((*expected, *actual), (3, 4));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("4 rows, expected 3"));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn append_to_missing_file_is_an_io_error() {
        let dir = tmp();
        let s = set(vec![(Column::Occupants, vec![1.0])]);
        let err = CsvScheduleWriter::new(dir.path().join("nope.csv"), WriteMode::Append)
            .write(&s)
            .unwrap_err();
        assert!(matches!(err, OutputError::Io(_)));
    }
}
