//! household: generate one household's annual schedules and write them as CSV.
//!
//! ```text
//! household <config.toml> [tables_dir|-] [out.csv]
//! ```
//!
//! Without a tables directory (or with `-`) the built-in synthetic tables
//! are used.  Logging goes through `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sched_core::{OccupantId, ScheduleConfig};
use sched_enduse::EndUseConstants;
use sched_gen::{Column, GenerationObserver, GeneratorBuilder, Outcome, RunReport};
use sched_markov::ActivityMatrix;
use sched_output::{CsvScheduleWriter, ScheduleWriter, WriteMode};
use sched_tables::{ProbabilityTables, load_tables_dir, synthetic_tables};

const DEFAULT_OUTPUT: &str = "output/household/schedules.csv";

// ── Config file ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DemoFile {
    schedule:  ScheduleConfig,
    constants: EndUseConstants,
    /// Output columns; the building's full set when absent.
    columns:   Option<Vec<String>>,
    append:    bool,
}

fn load_config(path: &Path) -> Result<DemoFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_tables(dir: Option<&str>) -> Result<ProbabilityTables> {
    match dir {
        None | Some("-") => {
            info!("using synthetic probability tables");
            Ok(synthetic_tables()?)
        }
        Some(dir) => {
            info!(dir, "loading probability tables");
            Ok(load_tables_dir(Path::new(dir))?)
        }
    }
}

// ── Progress observer ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Progress {
    occupants: usize,
    columns:   usize,
    warnings:  Vec<String>,
}

impl GenerationObserver for Progress {
    fn on_occupant(&mut self, id: OccupantId, matrix: &ActivityMatrix) {
        self.occupants += 1;
        println!(
            "  occupant {:<3} {}  away {:>6.0} h/yr",
            id.0,
            matrix.occupancy_type(),
            matrix.away_hours()
        );
    }

    fn on_column(&mut self, _column: Column, _values: &[f64]) {
        self.columns += 1;
    }

    fn on_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn on_run_end(&mut self, report: &RunReport) {
        println!("  seed {}  ({} occupants reported)", report.seed, report.occupants);
        if let Some(ev) = report.ev_occupant {
            println!(
                "  EV driven by occupant {}  shortfall {:.0} min",
                ev.0, report.ev_shortfall_minutes
            );
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(config_path) = args.get(1) else {
        bail!("usage: {} <config.toml> [tables_dir|-] [out.csv]", args[0]);
    };
    let out = PathBuf::from(args.get(3).map_or(DEFAULT_OUTPUT, String::as_str));

    println!("=== household: stochastic schedule generator ===");
    let file = load_config(Path::new(config_path))?;
    let tables = load_tables(args.get(2).map(String::as_str))?;

    let mut builder = GeneratorBuilder::new(file.schedule, &tables).constants(file.constants);
    if let Some(names) = &file.columns {
        builder = builder.columns(Column::parse_list(names)?);
    }
    let generator = builder.build()?;
    println!(
        "{} | {} occupants | {}-minute steps | {} columns",
        generator.calendar(),
        generator.config().occupants,
        generator.config().timestep_minutes,
        generator.columns().len()
    );

    let t0 = Instant::now();
    let mut progress = Progress::default();
    let set = match generator.generate(&mut progress)? {
        Outcome::Generated(set) => set,
        Outcome::NoOccupants => {
            println!("No occupants: no schedules generated, nothing written.");
            return Ok(());
        }
    };
    println!(
        "Generated {} columns × {} rows in {:.3} s",
        progress.columns,
        set.rows(),
        t0.elapsed().as_secs_f64()
    );
    for w in &progress.warnings {
        println!("  warning: {w}");
    }

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mode = if file.append { WriteMode::Append } else { WriteMode::Create };
    CsvScheduleWriter::new(&out, mode).write(&set)?;
    println!("Wrote {} ({:?})", out.display(), mode);
    Ok(())
}
