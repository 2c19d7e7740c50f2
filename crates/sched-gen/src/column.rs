//! Output column names.

use std::fmt;

use sched_core::ScheduleConfig;

use crate::{GenError, GenResult};

/// One supported output column.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Column {
    Occupants,
    LightingInterior,
    LightingGarage,
    CookingRange,
    Dishwasher,
    ClothesWasher,
    ClothesDryer,
    CeilingFan,
    PlugLoadsOther,
    PlugLoadsTv,
    HotWaterDishwasher,
    HotWaterClothesWasher,
    HotWaterFixtures,
    ElectricVehicleCharging,
    ElectricVehicleDischarging,
    ElectricVehicle,
    /// Debug only.
    Sleeping,
    /// Debug only.
    EvOccupantPresence,
}

impl Column {
    pub const ALL: [Column; 18] = [
        Column::Occupants,
        Column::LightingInterior,
        Column::LightingGarage,
        Column::CookingRange,
        Column::Dishwasher,
        Column::ClothesWasher,
        Column::ClothesDryer,
        Column::CeilingFan,
        Column::PlugLoadsOther,
        Column::PlugLoadsTv,
        Column::HotWaterDishwasher,
        Column::HotWaterClothesWasher,
        Column::HotWaterFixtures,
        Column::ElectricVehicleCharging,
        Column::ElectricVehicleDischarging,
        Column::ElectricVehicle,
        Column::Sleeping,
        Column::EvOccupantPresence,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Column::Occupants                  => "occupants",
            Column::LightingInterior           => "lighting_interior",
            Column::LightingGarage             => "lighting_garage",
            Column::CookingRange               => "cooking_range",
            Column::Dishwasher                 => "dishwasher",
            Column::ClothesWasher              => "clothes_washer",
            Column::ClothesDryer               => "clothes_dryer",
            Column::CeilingFan                 => "ceiling_fan",
            Column::PlugLoadsOther             => "plug_loads_other",
            Column::PlugLoadsTv                => "plug_loads_tv",
            Column::HotWaterDishwasher         => "hot_water_dishwasher",
            Column::HotWaterClothesWasher      => "hot_water_clothes_washer",
            Column::HotWaterFixtures           => "hot_water_fixtures",
            Column::ElectricVehicleCharging    => "electric_vehicle_charging",
            Column::ElectricVehicleDischarging => "electric_vehicle_discharging",
            Column::ElectricVehicle            => "electric_vehicle",
            Column::Sleeping                   => "sleeping",
            Column::EvOccupantPresence         => "ev_occupant_presence",
        }
    }

    /// Parse a column name; unknown names list every valid one.
    pub fn parse(name: &str) -> GenResult<Column> {
        Column::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| GenError::UnknownColumn {
                name:  name.to_string(),
                valid: Column::ALL.map(Column::as_str).join(", "),
            })
    }

    /// Parse every name, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> GenResult<Vec<Column>> {
        names.iter().map(|n| Column::parse(n.as_ref())).collect()
    }

    /// Columns only produced with the debug flag.
    pub fn is_debug(self) -> bool {
        matches!(self, Column::Sleeping | Column::EvOccupantPresence)
    }

    /// Columns that need a vehicle.
    pub fn needs_vehicle(self) -> bool {
        matches!(
            self,
            Column::ElectricVehicleCharging
                | Column::ElectricVehicleDischarging
                | Column::ElectricVehicle
                | Column::EvOccupantPresence
        )
    }

    /// Whether the building described by `config` has this column's device.
    pub fn is_present(self, config: &ScheduleConfig) -> bool {
        let a = &config.appliances;
        match self {
            Column::CookingRange => a.cooking_range,
            Column::Dishwasher | Column::HotWaterDishwasher => a.dishwasher,
            Column::ClothesWasher | Column::HotWaterClothesWasher => a.clothes_washer,
            Column::ClothesDryer => a.clothes_dryer,
            Column::CeilingFan => a.ceiling_fan,
            Column::PlugLoadsOther => a.plug_loads_other,
            Column::PlugLoadsTv => a.plug_loads_tv,
            c if c.needs_vehicle() => config.vehicle.is_some(),
            _ => true,
        }
    }

    /// Every column the building supports, plus debug columns when enabled.
    pub fn default_set(config: &ScheduleConfig) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| c.is_present(config) && (config.debug || !c.is_debug()))
            .collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Column {
    type Err = GenError;

    fn from_str(s: &str) -> GenResult<Column> {
        Column::parse(s)
    }
}
