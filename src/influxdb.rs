use crate::config::InfluxConfig;
use crate::error::{Result, StorageError};
use futures::prelude::stream;
use influxdb2::models::DataPoint;

/// Writes plant data points to one InfluxDB2 bucket.
pub struct Client {
    client: influxdb2::Client,
    bucket: String,
}

impl Client {
    pub(crate) fn new(config: InfluxConfig) -> Self {
        let client = influxdb2::Client::new(config.url, config.org, config.token);
        Self {
            client,
            bucket: config.bucket,
        }
    }

    /// Writes `points`. An empty batch is not sent.
    pub async fn write(&self, points: Vec<DataPoint>) -> Result<(), StorageError> {
        if points.is_empty() {
            tracing::debug!("No points to write to bucket {}", self.bucket);
            return Ok(());
        }

        let count = points.len();
        self.client
            .write(self.bucket.as_str(), stream::iter(points))
            .await?;
        tracing::debug!("Wrote {} points to bucket {}", count, self.bucket);
        Ok(())
    }
}
