use crate::error::SmilesError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use std::time::Duration;

const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Body keys that are masked before a request is logged.
const REDACTED_KEYS: &[&str] = &["password"];

/// Undecoded answer from the API.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Posts JSON bodies to the S-Miles Cloud API.
///
/// The transport knows nothing about envelopes or tokens: callers pass in the
/// headers to attach and decode the body themselves. Every request is bounded
/// by the timeout given at construction and is never retried here.
pub struct Transport {
    http_client: HttpClient,
    base_url: String,
}

impl Transport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SmilesError> {
        let base_url = base_url.into();
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SmilesError::transport(base_url.as_str(), e))?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn send(
        &self,
        path: &str,
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> Result<RawResponse, SmilesError> {
        let url = self.url(path);
        tracing::debug!("-> {} {}", path, redacted(body));

        let mut request = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.json(body).send().await.map_err(|e| {
            tracing::error!("Error sending HTTP request to {}: {}", path, e);
            SmilesError::transport(path, e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::error!("API endpoint not found: {}", url);
            return Err(SmilesError::NotFound { url });
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!("Error reading HTTP response body from {}: {}", path, e);
            SmilesError::transport(path, e)
        })?;
        tracing::debug!("<- HTTP {} ({} bytes)", status, body.len());

        Ok(RawResponse { status, body })
    }
}

/// Renders `body` for logging with credential fields masked.
pub(crate) fn redacted(body: &Value) -> String {
    match body {
        Value::Object(map) => {
            let mut masked = map.clone();
            for key in REDACTED_KEYS {
                if let Some(value) = masked.get_mut(*key) {
                    *value = Value::String("[REDACTED]".to_string());
                }
            }
            Value::Object(masked).to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(url: &str) -> Transport {
        Transport::new(url, Duration::from_secs(30)).unwrap()
    }

    mod succeeds {
        use super::*;

        #[test]
        fn test_url_joins_slashes() {
            assert_eq!(
                transport("https://neapi.hoymiles.com/").url("iam/pub/0/auth/login"),
                "https://neapi.hoymiles.com/iam/pub/0/auth/login"
            );
            assert_eq!(
                transport("http://127.0.0.1:1234").url("/pvm/api"),
                "http://127.0.0.1:1234/pvm/api"
            );
        }

        #[test]
        fn test_redacted_masks_password() {
            let body = json!({"user_name": "solar", "password": "secret"});
            let rendered = redacted(&body);
            assert!(rendered.contains("[REDACTED]"));
            assert!(rendered.contains("solar"));
            assert!(!rendered.contains("secret"));
        }

        #[tokio::test]
        async fn test_send_posts_json_with_headers() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/pvm/api/0/station/select_by_page"))
                .and(header("content-type", JSON_CONTENT_TYPE))
                .and(header("Authorization", "tok"))
                .and(body_json(json!({"page": 1})))
                .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"0"}"#))
                .expect(1)
                .mount(&server)
                .await;

            let result = transport(&server.uri())
                .send(
                    "pvm/api/0/station/select_by_page",
                    &[("Authorization", "tok".to_string())],
                    &json!({"page": 1}),
                )
                .await
                .unwrap();

            assert_eq!(result.status, StatusCode::OK);
            assert_eq!(result.body, r#"{"status":"0"}"#);
        }

        #[tokio::test]
        async fn test_send_passes_server_errors_through() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
                .mount(&server)
                .await;

            let result = transport(&server.uri())
                .send("any", &[], &json!({}))
                .await
                .unwrap();

            assert_eq!(result.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(result.body, "boom");
        }
    }

    mod fails {
        use super::*;

        #[tokio::test]
        async fn test_send_not_found() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(404))
                .expect(1)
                .mount(&server)
                .await;

            let err = transport(&server.uri())
                .send("missing/path", &[], &json!({}))
                .await
                .unwrap_err();

            match err {
                SmilesError::NotFound { url } => assert!(url.ends_with("/missing/path")),
                other => panic!("expected NotFound, got {:?}", other),
            }
        }

        #[tokio::test]
        async fn test_send_timeout() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
                .mount(&server)
                .await;

            let transport = Transport::new(server.uri(), Duration::from_millis(100)).unwrap();
            let err = transport.send("slow", &[], &json!({})).await.unwrap_err();

            assert!(matches!(err, SmilesError::Transport { .. }));
        }

        #[tokio::test]
        async fn test_send_connection_error() {
            let err = transport("http://localhost:1")
                .send("anything", &[], &json!({}))
                .await
                .unwrap_err();

            assert!(matches!(err, SmilesError::Transport { .. }));
        }
    }
}
