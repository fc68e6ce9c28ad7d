use std::fmt;

/// Represents the type of measurement being collected.
///
/// Each measurement type corresponds to a different InfluxDB measurement
/// (table) where the data will be stored. All of them are tagged with the
/// plant identifier.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Measurement {
    /// Identity attributes of a plant, always valued 1
    PlantInfo,
    /// Current power output in W
    PlantPower,
    /// Energy produced today
    PlantEnergyToday,
    /// Lifetime energy including today
    PlantEnergyTotal,
    /// Unix time of the plant's last report to the cloud
    PlantLastUpdate,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Measurement::PlantInfo => write!(f, "plant_info"),
            Measurement::PlantPower => write!(f, "plant_power"),
            Measurement::PlantEnergyToday => write!(f, "plant_energy_today"),
            Measurement::PlantEnergyTotal => write!(f, "plant_energy_total"),
            Measurement::PlantLastUpdate => write!(f, "plant_last_update"),
        }
    }
}
