use crate::error::{Result, StorageError};
use chrono::{DateTime, Local};
use influxdb2::models::DataPoint;

use super::traits::DataPointBuilder;
use super::types::Measurement;

fn timestamp_nanos(timestamp: &DateTime<Local>) -> Result<i64, StorageError> {
    timestamp
        .timestamp_nanos_opt()
        .ok_or_else(|| StorageError::InvalidDataPoint("Timestamp overflow".to_string()))
}

/// Identity attributes of a plant.
///
/// The value is always 1; the interesting data sits in the tags.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantInfoMetric {
    pub plant_id: u64,
    pub name: String,
    /// Rated capacity in W
    pub max_power: f64,
    pub timestamp: DateTime<Local>,
}

impl DataPointBuilder for PlantInfoMetric {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        DataPoint::builder(Measurement::PlantInfo.to_string().as_str())
            .tag("plant_id", self.plant_id.to_string())
            .tag("name", self.name.clone())
            .tag("max_power", format!("{:.0}", self.max_power))
            .field("value", 1i64)
            .timestamp(timestamp_nanos(&self.timestamp)?)
            .build()
            .map_err(|e| {
                StorageError::InvalidDataPoint(format!("Failed to build PlantInfoMetric: {}", e))
            })
    }
}

/// A single numeric reading of a plant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantValueMetric {
    /// One of the per-plant value measurements (power, energy, last update)
    pub measurement: Measurement,
    pub plant_id: u64,
    pub value: f64,
    pub timestamp: DateTime<Local>,
}

impl DataPointBuilder for PlantValueMetric {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        DataPoint::builder(self.measurement.to_string().as_str())
            .tag("plant_id", self.plant_id.to_string())
            .field("value", self.value)
            .timestamp(timestamp_nanos(&self.timestamp)?)
            .build()
            .map_err(|e| {
                StorageError::InvalidDataPoint(format!("Failed to build PlantValueMetric: {}", e))
            })
    }
}
