use crate::config::{AuthStyle, SmilesConfig};
use crate::error::{Result, SmilesError};
use crate::smiles::envelope::{ApiStatus, Envelope};
use crate::smiles::session::Session;
use crate::smiles::transport::Transport;
use crate::smiles::LOGIN_PATH;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// How many times a request is re-sent after the API reports an expired token.
const MAX_TOKEN_RETRIES: u32 = 1;

/// Cookie carrying the token when [`AuthStyle::Cookie`] is configured.
const TOKEN_COOKIE: &str = "hm_token";

/// Authenticated S-Miles Cloud client.
///
/// Wraps the transport and the session: every call carries the current token
/// and an expired token is renewed and the request retried once.
pub struct Client {
    transport: Transport,
    session: Session,
    auth_style: AuthStyle,
    pub(crate) page_size: u32,
}

impl Client {
    pub fn new(config: SmilesConfig) -> Result<Self> {
        let scheme = config.password_scheme()?;
        let auth_style = config.auth_style()?;
        let transport = Transport::new(config.url.as_str(), config.timeout())?;
        Ok(Self {
            transport,
            session: Session::new(config.user, config.password, scheme),
            auth_style,
            page_size: config.page_size,
        })
    }

    /// Makes sure a session token is cached, logging in if necessary.
    pub async fn login(&self) -> Result<(), SmilesError> {
        self.session.ensure_authenticated(&self.transport).await
    }

    /// Posts `params` to `path` and decodes the envelope's payload into `T`.
    ///
    /// Unrecognized status codes are logged and the payload is returned as if
    /// the call had succeeded.
    pub async fn call<T: DeserializeOwned>(&self, path: &str, params: Value) -> Result<T, SmilesError> {
        let mut retries = 0;
        loop {
            let envelope = self.post(path, &params).await?;
            match envelope.api_status() {
                ApiStatus::Success => return envelope.into_data(path),
                ApiStatus::Failure => {
                    tracing::error!("-> API error ({}): {}", envelope.status, envelope.message);
                    return Err(SmilesError::api(envelope.status, envelope.message));
                }
                ApiStatus::TokenExpired => {
                    self.session.invalidate().await;
                    if retries >= MAX_TOKEN_RETRIES {
                        tracing::error!("Token still rejected for {} after re-authentication", path);
                        return Err(SmilesError::Auth(format!(
                            "token rejected for {} after re-authentication",
                            path
                        )));
                    }
                    retries += 1;
                    tracing::info!("Token expired, re-authenticating before retrying {}", path);
                    self.login().await?;
                }
                ApiStatus::Unrecognized(code) => {
                    tracing::warn!(
                        "Unexpected API status ({}) for {}: {}",
                        code,
                        path,
                        envelope.message
                    );
                    return envelope.into_data(path);
                }
            }
        }
    }

    async fn post(&self, path: &str, params: &Value) -> Result<Envelope, SmilesError> {
        let headers = self.auth_headers(path).await;
        let raw = self.transport.send(path, &headers, params).await?;
        Envelope::decode(path, &raw)
    }

    async fn auth_headers(&self, path: &str) -> Vec<(&'static str, String)> {
        if path == LOGIN_PATH {
            return Vec::new();
        }
        match self.session.current_token().await {
            None => Vec::new(),
            Some(token) => match self.auth_style {
                AuthStyle::Header => vec![("Authorization", token)],
                AuthStyle::Cookie => vec![("Cookie", format!("{}={}", TOKEN_COOKIE, token))],
            },
        }
    }
}
