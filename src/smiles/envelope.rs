use crate::error::SmilesError;
use crate::smiles::transport::RawResponse;
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;
use serde_json::Value;

/// Meaning of the envelope's `status` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Success,
    /// The accompanying message is the authoritative error text.
    Failure,
    /// The session token must be renewed before the request can succeed.
    TokenExpired,
    Unrecognized(String),
}

impl From<&str> for ApiStatus {
    fn from(status: &str) -> Self {
        match status {
            "0" => Self::Success,
            "1" => Self::Failure,
            "100" => Self::TokenExpired,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

/// Every API response is wrapped in this envelope.
///
/// `data` is kept as raw JSON until the status has been inspected, so a
/// failure response with an unexpected payload still reports its message.
#[derive(Deserialize, Debug)]
pub struct Envelope {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(rename = "systemNotice", default)]
    pub system_notice: Option<String>,
}

impl Envelope {
    pub fn decode(path: &str, raw: &RawResponse) -> Result<Self, SmilesError> {
        let envelope: Self = serde_json::from_str(&raw.body).map_err(|e| {
            tracing::error!("Error unmarshalling JSON response from {}: {}", path, e);
            SmilesError::decode(path, format!("HTTP {}: {}", raw.status, e))
        })?;

        tracing::debug!("<- API status code {} ({})", envelope.status, envelope.message);
        if let Some(notice) = envelope.system_notice.as_deref().filter(|n| !n.is_empty()) {
            tracing::info!("System notice from S-Miles Cloud: {}", notice);
        }

        Ok(envelope)
    }

    pub fn api_status(&self) -> ApiStatus {
        ApiStatus::from(self.status.as_str())
    }

    /// Decodes the payload into `T`. A missing or null payload is an error.
    pub fn into_data<T: DeserializeOwned>(self, path: &str) -> Result<T, SmilesError> {
        match self.data {
            Some(Value::Null) | None => Err(SmilesError::decode(path, "response has no data")),
            Some(data) => serde_json::from_value(data).map_err(|e| SmilesError::decode(path, e)),
        }
    }
}
