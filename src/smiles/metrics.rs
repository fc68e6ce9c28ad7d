//! Conversion of plant readings into metric builders.

use chrono::{DateTime, Local};

use crate::model::{DataPointBuilder, Measurement, PlantInfoMetric, PlantValueMetric};
use crate::smiles::plants::{PlantReading, PlantSummary};

/// Creates the metrics published for one plant per cycle.
///
/// The last-update metric is left out when the plant's timestamp could not be
/// parsed.
pub fn create_plant_metrics(
    plant: &PlantSummary,
    reading: &PlantReading,
    timestamp: DateTime<Local>,
) -> Vec<Box<dyn DataPointBuilder>> {
    let value = |measurement: Measurement, value: f64| -> Box<dyn DataPointBuilder> {
        Box::new(PlantValueMetric {
            measurement,
            plant_id: reading.plant_id,
            value,
            timestamp,
        })
    };

    let mut metrics: Vec<Box<dyn DataPointBuilder>> = vec![
        Box::new(PlantInfoMetric {
            plant_id: plant.id,
            name: plant.name.clone(),
            max_power: reading.max_power,
            timestamp,
        }),
        value(Measurement::PlantPower, reading.power),
        value(Measurement::PlantEnergyToday, reading.energy_today),
        value(Measurement::PlantEnergyTotal, reading.energy_total),
    ];

    if let Some(last_update) = reading.last_update {
        metrics.push(value(
            Measurement::PlantLastUpdate,
            last_update.timestamp() as f64,
        ));
    }

    metrics
}
