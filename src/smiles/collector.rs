//! Plant metric collector implementation.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::sync::Arc;

use crate::error::{CollectorError, Result};
use crate::model::{DataPointBuilder, MetricCollector};
use crate::smiles::client::Client;
use crate::smiles::metrics::create_plant_metrics;

/// Runs one collection cycle against S-Miles Cloud.
///
/// Login and the plant listing must succeed for the cycle to produce anything.
/// A plant whose reading fails on the network or in decoding is skipped; any
/// other failure aborts the cycle so the gap is visible downstream.
pub struct PlantMetricCollector {
    client: Arc<Client>,
}

impl PlantMetricCollector {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetricCollector for PlantMetricCollector {
    async fn collect(
        &self,
        timestamp: DateTime<Local>,
    ) -> Result<Vec<Box<dyn DataPointBuilder>>, CollectorError> {
        tracing::debug!("Collecting metrics …");
        self.client.login().await?;
        let plants = self.client.list_plants().await?;

        let mut metrics = Vec::new();
        for plant in &plants {
            tracing::debug!("Building metrics for plant ID {} …", plant.id);
            match self.client.fetch_reading(plant).await {
                Ok(reading) => metrics.extend(create_plant_metrics(plant, &reading, timestamp)),
                Err(e) if e.is_plant_local() => {
                    tracing::warn!(
                        plant_id = plant.id,
                        error = %e,
                        "Skipping plant for this cycle"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(metrics)
    }
}
