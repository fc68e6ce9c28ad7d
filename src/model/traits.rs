use crate::error::{CollectorError, Result, StorageError};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use influxdb2::models::DataPoint;

/// Trait for types that can be converted to InfluxDB data points.
///
/// Implementors must be thread-safe (Send + Sync) so builders can be handed
/// across the collection task.
pub trait DataPointBuilder: Send + Sync {
    /// Converts the metric into an InfluxDB DataPoint.
    fn to_point(&self) -> Result<DataPoint, StorageError>;
}

/// Trait for types that can collect plant metrics.
///
/// One call is one collection cycle; nothing is cached between calls.
#[async_trait]
pub trait MetricCollector: Send + Sync {
    /// Collects metrics, stamping them with `timestamp`.
    async fn collect(
        &self,
        timestamp: DateTime<Local>,
    ) -> Result<Vec<Box<dyn DataPointBuilder>>, CollectorError>;
}
