//! Model definitions for plant metrics and InfluxDB data points.
//!
//! This module provides the data structures and traits for representing
//! metrics collected from S-Miles Cloud and converting them to InfluxDB
//! data points.

pub mod metrics;
pub mod traits;
pub mod types;
pub mod utilities;

pub use metrics::{PlantInfoMetric, PlantValueMetric};
pub use traits::{DataPointBuilder, MetricCollector};
pub use types::Measurement;
pub use utilities::batch_collect_metrics;
