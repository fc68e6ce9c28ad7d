//! Configuration utilities for testing.

use crate::config::{InfluxConfig, SmilesConfig};

/// Builder for creating test S-Miles Cloud configurations.
#[derive(Debug)]
pub struct TestSmilesConfigBuilder {
    url: String,
    user: String,
    password: String,
    password_scheme: String,
    auth_style: String,
    timeout_sec: u64,
    page_size: u32,
}

impl TestSmilesConfigBuilder {
    /// Creates a new test config builder with default values.
    pub fn new() -> Self {
        Self {
            url: "http://test.local".to_string(),
            user: "test_user".to_string(),
            password: "test_password".to_string(),
            password_scheme: "dual".to_string(),
            auth_style: "header".to_string(),
            timeout_sec: 5,
            page_size: 100,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_password_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.password_scheme = scheme.into();
        self
    }

    pub fn with_auth_style(mut self, style: impl Into<String>) -> Self {
        self.auth_style = style.into();
        self
    }

    pub fn build(self) -> SmilesConfig {
        SmilesConfig {
            url: self.url,
            user: self.user,
            password: self.password,
            password_scheme: self.password_scheme,
            auth_style: self.auth_style,
            timeout_sec: self.timeout_sec,
            page_size: self.page_size,
        }
    }
}

/// Creates a default test S-Miles Cloud configuration.
pub fn test_smiles_config() -> SmilesConfig {
    TestSmilesConfigBuilder::new().build()
}

/// Creates a test InfluxDB configuration pointing at `url`.
pub fn test_influx_config_with_url(url: impl Into<String>) -> InfluxConfig {
    InfluxConfig {
        url: url.into(),
        org: "test-org".to_string(),
        token: "test-token".to_string(),
        bucket: "test-bucket".to_string(),
    }
}

/// Creates a default test InfluxDB configuration.
pub fn test_influx_config() -> InfluxConfig {
    test_influx_config_with_url("http://localhost:8086")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smiles_config_builder() {
        let config = TestSmilesConfigBuilder::new()
            .with_url("http://custom.local")
            .with_password_scheme("md5")
            .with_auth_style("cookie")
            .build();

        assert_eq!(config.url, "http://custom.local");
        assert_eq!(config.user, "test_user");
        assert_eq!(config.password_scheme, "md5");
        assert_eq!(config.auth_style, "cookie");
    }

    #[test]
    fn test_convenience_functions() {
        assert_eq!(test_smiles_config().url, "http://test.local");
        assert_eq!(test_influx_config().url, "http://localhost:8086");
        assert_eq!(test_influx_config_with_url("http://mock:8086").url, "http://mock:8086");
    }
}
