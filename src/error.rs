//! Error types for the S-Miles Cloud to InfluxDB2 forwarder.
//!
//! This module defines typed errors for different components of the application,
//! so callers can tell a dead network apart from a rejected login or an API
//! that answered with an error message.

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// S-Miles Cloud communication and decoding errors
    #[error("S-Miles Cloud error")]
    Smiles(#[from] SmilesError),

    /// InfluxDB storage errors
    #[error("storage error")]
    Storage(#[from] StorageError),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// S-Miles Cloud communication and decoding errors.
#[derive(Error, Debug)]
pub enum SmilesError {
    /// Network failure or timeout while talking to the API
    #[error("HTTP request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint does not exist; the base URL or path is misconfigured
    #[error("API endpoint not found: {url}")]
    NotFound { url: String },

    /// The response body could not be decoded into the expected shape
    #[error("failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    /// Login was rejected or the session could not be renewed
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The API reported a hard failure
    #[error("API error (status {status}): {message}")]
    Api { status: String, message: String },
}

/// Metric collection errors.
#[derive(Error, Debug)]
pub enum CollectorError {
    /// Data source error
    #[error("failed to collect from source")]
    Source(#[from] SmilesError),
}

/// InfluxDB storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// InfluxDB client error
    #[error("InfluxDB error: {0}")]
    Client(#[from] influxdb2::RequestError),

    /// Invalid data point
    #[error("invalid data point: {0}")]
    InvalidDataPoint(String),
}

impl ConfigError {
    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl SmilesError {
    /// Creates a transport error for a request to `path`.
    pub fn transport(path: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            path: path.into(),
            source,
        }
    }

    /// Creates a decode error.
    pub fn decode(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Creates an API error from an envelope status and message.
    pub fn api(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Whether a failed plant reading may be skipped while the rest of the
    /// cycle continues.
    pub fn is_plant_local(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Decode { .. })
    }
}
