//! S-Miles Cloud to InfluxDB2 Forwarder
//!
//! This application polls the S-Miles Cloud solar monitoring API for the
//! plants of one account and forwards their readings to InfluxDB2.
//!
//! # Architecture
//!
//! A single supervised task runs one collection cycle per interval:
//! authenticate, list plants, fetch each plant's reading, write the points.
//!
//! # Features
//!
//! - Self-healing session: an expired token is renewed and the request retried once
//! - Automatic restart of the collection task on failure
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Timeout protection for hung cycles

mod config;
mod error;
mod influxdb;
mod model;
mod smiles;

#[cfg(test)]
mod test_utils;

use crate::model::{batch_collect_metrics, MetricCollector};
use anyhow::Context;
use chrono::Local;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinError;
use tokio::time;
use tokio::time::{sleep, Duration};

/// Application entry point.
///
/// Loads configuration, sets up the collector, and supervises the collection
/// task until a termination signal arrives.
#[tokio::main]
async fn main() -> error::Result<()> {
    let app_config = config::load_app_config()?;
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let collector_config = Arc::new(config::load_collector_config()?);
    let influx_client = Arc::new(influxdb::Client::new(config::load_influx_config()?));

    let smiles_config = config::load_smiles_config()?;
    tracing::debug!("{:?}", smiles_config);
    let smiles_client = Arc::new(smiles::Client::new(smiles_config)?);

    let collectors: Arc<Vec<Box<dyn MetricCollector>>> = Arc::new(vec![Box::new(
        smiles::PlantMetricCollector::new(Arc::clone(&smiles_client)),
    )
        as Box<dyn MetricCollector>]);

    let spawn_collect_task = || -> tokio::task::JoinHandle<()> {
        let config = Arc::clone(&collector_config);
        tokio::spawn(create_collect_task(
            Arc::clone(&influx_client),
            Arc::clone(&collectors),
            Duration::from_secs(config.interval_sec),
            "plant_collectors",
            config.task_timeout_seconds,
        ))
    };
    let mut collect_task = spawn_collect_task();

    let mut sig_term =
        signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;
    tracing::info!("Running... Press Ctrl-C or send SIGTERM to terminate.");
    loop {
        tokio::select! {
            _ = sig_term.recv() => {
                tracing::info!("Received SIGTERM. Exiting...");
                break;
            }
            _ = ctrl_c() => {
                tracing::info!("Received SIGINT. Exiting...");
                break;
            }
            result = &mut collect_task => {
                handle_task_result("plant_collectors", result);
                collect_task = spawn_collect_task();
            }
        }
    }

    Ok(())
}

/// Wraps a future with a timeout so a hung upstream call cannot block the
/// task forever. A timeout is logged, not propagated.
async fn with_timeout<F>(task_name: &'static str, future: F, timeout_seconds: u64)
where
    F: IntoFuture,
{
    let timeout_duration = Duration::from_secs(timeout_seconds);

    match time::timeout(timeout_duration, future).await {
        Ok(_) => {}
        Err(_) => tracing::error!("Task {} timed out.", task_name),
    }
}

/// Runs one collection cycle, writes the result, then sleeps for `interval`.
///
/// Collection and write failures are logged; the points of a failed cycle
/// are dropped rather than replaced with stale values.
async fn create_collect_task(
    influx_client: Arc<influxdb::Client>,
    collectors: Arc<Vec<Box<dyn MetricCollector>>>,
    interval: Duration,
    task_name: &'static str,
    timeout_seconds: u64,
) {
    with_timeout(
        task_name,
        async {
            match collect_and_write(&influx_client, &collectors).await {
                Ok(count) => tracing::info!(
                    "Successfully wrote {} points to InfluxDB ({})",
                    count,
                    task_name
                ),
                Err(e) => tracing::error!("Collection cycle failed ({}): {:?}", task_name, e),
            }
        },
        timeout_seconds,
    )
    .await;
    sleep(interval).await;
}

/// Collects from every collector and writes the points in one batch.
async fn collect_and_write(
    influx_client: &influxdb::Client,
    collectors: &[Box<dyn MetricCollector>],
) -> error::Result<usize> {
    let points = batch_collect_metrics(collectors, Local::now()).await;

    for point in &points {
        tracing::debug!("{:?}", point);
    }

    let count = points.len();
    influx_client.write(points).await?;
    Ok(count)
}

/// Logs how a collection task ended before the main loop restarts it.
fn handle_task_result(task_name: &str, result: Result<(), JoinError>) {
    match result {
        Ok(_) => {
            tracing::debug!("Task {} completed.", task_name);
        }
        Err(e) => {
            tracing::error!("Task {} failed: {:?}", task_name, e);
        }
    }
}
