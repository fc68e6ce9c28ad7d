//! Mock implementations and server helpers for testing.

use crate::error::{CollectorError, Result, SmilesError, StorageError};
use crate::model::{DataPointBuilder, MetricCollector};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use influxdb2::models::DataPoint;
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches requests that do not carry the named header.
pub struct NoHeader(pub &'static str);

impl Match for NoHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key(self.0)
    }
}

/// A mock metric collector that can be configured to succeed or fail.
pub struct MockMetricCollector {
    should_fail: bool,
    create_data: Box<dyn Fn() -> Vec<Box<dyn DataPointBuilder>> + Send + Sync>,
}

impl MockMetricCollector {
    /// Creates a mock collector that fails like a rejected login.
    pub fn new_failure() -> Self {
        Self {
            should_fail: true,
            create_data: Box::new(Vec::new),
        }
    }

    /// Creates a mock collector with custom success data.
    pub fn new_with_data<F>(create_fn: F) -> Self
    where
        F: Fn() -> Vec<Box<dyn DataPointBuilder>> + Send + Sync + 'static,
    {
        Self {
            should_fail: false,
            create_data: Box::new(create_fn),
        }
    }
}

#[async_trait]
impl MetricCollector for MockMetricCollector {
    async fn collect(
        &self,
        _timestamp: DateTime<Local>,
    ) -> Result<Vec<Box<dyn DataPointBuilder>>, CollectorError> {
        if self.should_fail {
            Err(SmilesError::Auth("mock collector configured to fail".to_string()).into())
        } else {
            Ok((self.create_data)())
        }
    }
}

/// A builder whose conversion always fails.
pub struct FailingDataPointBuilder;

impl DataPointBuilder for FailingDataPointBuilder {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        Err(StorageError::InvalidDataPoint("always fails".to_string()))
    }
}

/// Builder for creating wiremock server mocks for InfluxDB endpoints.
pub struct MockInfluxServerBuilder {
    server: MockServer,
}

impl MockInfluxServerBuilder {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Mocks a write error response.
    pub async fn mock_write_error(self, status: u16, message: &str) -> Self {
        Mock::given(method("POST"))
            .and(path("/api/v2/write"))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
        self
    }

    /// Mocks successful writes, expecting exactly `times` of them.
    pub async fn mock_write_with_expectation(self, times: u64) -> Self {
        Mock::given(method("POST"))
            .and(path("/api/v2/write"))
            .respond_with(ResponseTemplate::new(204))
            .expect(times)
            .mount(&self.server)
            .await;
        self
    }

    pub fn build(self) -> MockServer {
        self.server
    }
}
