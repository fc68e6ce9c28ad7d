use crate::error::ConfigError;
use anyhow::{anyhow, Result};
use serde_derive::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig> {
    match envy::from_env::<AppConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load AppConfig: {}", err)),
    }
}

fn default_interval_sec() -> u64 {
    60
}

fn default_task_timeout_seconds() -> u64 {
    120
}

#[derive(Deserialize, Debug)]
pub struct CollectorConfig {
    #[serde(default = "default_interval_sec")]
    pub interval_sec: u64,
    // upper bound for one whole cycle, on top of the per-request timeout
    #[serde(default = "default_task_timeout_seconds")]
    pub task_timeout_seconds: u64,
}

pub fn load_collector_config() -> Result<CollectorConfig> {
    match envy::prefixed("COLLECTOR_").from_env::<CollectorConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load CollectorConfig: {}", err)),
    }
}

/// How the login password is digested before it is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordScheme {
    /// Lowercase hex MD5 of the password.
    Md5,
    /// `hex(md5) + "." + base64(sha256)`, expected by the current API generation.
    Dual,
}

impl FromStr for PasswordScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "dual" => Ok(Self::Dual),
            other => Err(ConfigError::invalid(
                "SMILES_PASSWORD_SCHEME",
                format!("expected 'dual' or 'md5', got '{}'", other),
            )),
        }
    }
}

/// Where the session token travels on authenticated requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStyle {
    /// `Authorization: <token>`
    Header,
    /// `Cookie: hm_token=<token>`
    Cookie,
}

impl FromStr for AuthStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "header" => Ok(Self::Header),
            "cookie" => Ok(Self::Cookie),
            other => Err(ConfigError::invalid(
                "SMILES_AUTH_STYLE",
                format!("expected 'header' or 'cookie', got '{}'", other),
            )),
        }
    }
}

fn default_smiles_url() -> String {
    "https://neapi.hoymiles.com/".to_string()
}

fn default_password_scheme() -> String {
    "dual".to_string()
}

fn default_auth_style() -> String {
    "header".to_string()
}

fn default_timeout_sec() -> u64 {
    30
}

fn default_page_size() -> u32 {
    100
}

#[derive(Deserialize, Clone)]
pub struct SmilesConfig {
    #[serde(default = "default_smiles_url")]
    pub url: String,
    pub user: String,
    pub password: String,
    #[serde(default = "default_password_scheme")]
    pub password_scheme: String,
    #[serde(default = "default_auth_style")]
    pub auth_style: String,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl SmilesConfig {
    pub fn password_scheme(&self) -> Result<PasswordScheme, ConfigError> {
        self.password_scheme.parse()
    }

    pub fn auth_style(&self) -> Result<AuthStyle, ConfigError> {
        self.auth_style.parse()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }
}

impl fmt::Debug for SmilesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmilesConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("password_scheme", &self.password_scheme)
            .field("auth_style", &self.auth_style)
            .field("timeout_sec", &self.timeout_sec)
            .field("page_size", &self.page_size)
            .finish()
    }
}

pub(crate) fn load_smiles_config() -> Result<SmilesConfig> {
    match envy::prefixed("SMILES_").from_env::<SmilesConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load SmilesConfig: {}", err)),
    }
}

#[derive(Deserialize, Debug)]
pub struct InfluxConfig {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

pub fn load_influx_config() -> Result<InfluxConfig> {
    match envy::prefixed("INFLUXDB_").from_env::<InfluxConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load InfluxConfig: {}", err)),
    }
}
