use chrono::{DateTime, Local};
use futures::future::join_all;
use influxdb2::models::DataPoint;

use super::traits::MetricCollector;

/// Runs all collectors concurrently and converts their output to data points.
///
/// A collector that fails contributes nothing, and so does a builder that
/// cannot be converted; both are logged and the rest of the batch is kept.
pub async fn batch_collect_metrics(
    collectors: &[Box<dyn MetricCollector>],
    timestamp: DateTime<Local>,
) -> Vec<DataPoint> {
    let results = join_all(collectors.iter().map(|c| c.collect(timestamp))).await;

    results
        .into_iter()
        .filter_map(|res| match res {
            Ok(builders) => Some(builders),
            Err(e) => {
                tracing::error!(error = %e, cause = ?std::error::Error::source(&e), "Failed to get metrics");
                None
            }
        })
        .flatten()
        .filter_map(|builder| match builder.to_point() {
            Ok(point) => Some(point),
            Err(e) => {
                tracing::error!("Failed to convert to point: {:?}", e);
                None
            }
        })
        .collect()
}
