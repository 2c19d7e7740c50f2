//! Fluent builder for constructing a [`ScheduleGenerator`].

use sched_core::{Calendar, ScheduleConfig};
use sched_enduse::EndUseConstants;
use sched_tables::ProbabilityTables;

use crate::{Column, GenError, GenResult, ScheduleGenerator};

/// Fluent builder for [`ScheduleGenerator`].
///
/// # Required inputs
///
/// - [`ScheduleConfig`]: occupants, devices, location, year, timestep, seed
/// - [`ProbabilityTables`]: loaded or synthetic, already validated
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                   |
/// |------------------|-------------------------------------------|
/// | `.constants(c)`  | `EndUseConstants::default()`              |
/// | `.columns(v)`    | [`Column::default_set`] for the building  |
///
/// # Example
///
/// ```rust,ignore
/// let tables = synthetic_tables()?;
/// let generator = GeneratorBuilder::new(config, &tables)
///     .columns(Column::parse_list(&["occupants", "hot_water_fixtures"])?)
///     .build()?;
/// let outcome = generator.generate(&mut NoopObserver)?;
/// ```
pub struct GeneratorBuilder<'a> {
    config:    ScheduleConfig,
    tables:    &'a ProbabilityTables,
    constants: Option<EndUseConstants>,
    columns:   Option<Vec<Column>>,
}

impl<'a> GeneratorBuilder<'a> {
    pub fn new(config: ScheduleConfig, tables: &'a ProbabilityTables) -> Self {
        Self { config, tables, constants: None, columns: None }
    }

    /// Override the empirical constants.
    pub fn constants(mut self, constants: EndUseConstants) -> Self {
        self.constants = Some(constants);
        self
    }

    /// Request specific output columns, in output order.
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Validate every input and return a ready-to-run generator.
    pub fn build(self) -> GenResult<ScheduleGenerator<'a>> {
        self.config.validate()?;
        let calendar = Calendar::new(self.config.year)?;

        let constants = self.constants.unwrap_or_default();
        constants.validate()?;

        let region = &self.config.location.region;
        let shifts = *self.tables.monthly_shifts(region).ok_or_else(|| GenError::UnknownRegion {
            region: region.clone(),
            known:  self.tables.regions().join(", "),
        })?;

        let columns = match self.columns {
            Some(columns) => {
                for &c in &columns {
                    if c.is_debug() && !self.config.debug {
                        return Err(GenError::UnavailableColumn {
                            column: c.as_str(),
                            reason: "is only produced in debug mode",
                        });
                    }
                    if c.needs_vehicle() && self.config.vehicle.is_none() {
                        return Err(GenError::UnavailableColumn {
                            column: c.as_str(),
                            reason: "requires a vehicle",
                        });
                    }
                    if !c.is_present(&self.config) {
                        return Err(GenError::UnavailableColumn {
                            column: c.as_str(),
                            reason: "is not present in the building",
                        });
                    }
                }
                columns
            }
            None => Column::default_set(&self.config),
        };

        Ok(ScheduleGenerator {
            config: self.config,
            tables: self.tables,
            constants,
            columns,
            calendar,
            shifts,
        })
    }
}
