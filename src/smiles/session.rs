use crate::config::PasswordScheme;
use crate::error::SmilesError;
use crate::smiles::envelope::{ApiStatus, Envelope};
use crate::smiles::transport::Transport;
use crate::smiles::LOGIN_PATH;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use md5::Md5;
use serde_derive::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

#[derive(Deserialize, Debug)]
struct LoginData {
    #[serde(default)]
    token: String,
}

/// Digests the plain password the way the login endpoint expects it.
pub fn digest_password(password: &str, scheme: PasswordScheme) -> String {
    let md5_hex = hex::encode(Md5::digest(password.as_bytes()));
    match scheme {
        PasswordScheme::Md5 => md5_hex,
        PasswordScheme::Dual => {
            let sha256 = Sha256::digest(password.as_bytes());
            format!("{}.{}", md5_hex, STANDARD.encode(sha256))
        }
    }
}

/// Owns the credentials and the one session token of the process.
///
/// The token is guarded by a mutex that is held for the whole login, so two
/// cycles racing on an empty session log in once.
pub struct Session {
    user: String,
    password: String,
    scheme: PasswordScheme,
    token: Mutex<Option<String>>,
}

impl Session {
    pub fn new(user: impl Into<String>, password: impl Into<String>, scheme: PasswordScheme) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            scheme,
            token: Mutex::new(None),
        }
    }

    pub async fn current_token(&self) -> Option<String> {
        self.token.lock().await.clone()
    }

    pub async fn invalidate(&self) {
        *self.token.lock().await = None;
        tracing::debug!("Token invalidated");
    }

    /// Logs in unless a token is already cached.
    pub async fn ensure_authenticated(&self, transport: &Transport) -> Result<(), SmilesError> {
        let mut token = self.token.lock().await;
        if token.is_some() {
            tracing::debug!("Re-using cached token");
            return Ok(());
        }

        tracing::info!("Authenticating with username and password …");
        let body = json!({
            "user_name": self.user,
            "password": digest_password(&self.password, self.scheme),
        });

        let raw = transport.send(LOGIN_PATH, &[], &body).await?;
        let envelope = Envelope::decode(LOGIN_PATH, &raw)?;
        if envelope.api_status() != ApiStatus::Success {
            tracing::error!(
                "Login failed for user '{}': {} ({})",
                self.user,
                envelope.message,
                envelope.status
            );
            return Err(SmilesError::Auth(format!(
                "login rejected for user '{}': {}",
                self.user, envelope.message
            )));
        }

        let data: LoginData = envelope.into_data(LOGIN_PATH)?;
        if data.token.is_empty() {
            tracing::error!("Failed to parse login token for user '{}'.", self.user);
            return Err(SmilesError::Auth(format!(
                "login response for user '{}' carried no token",
                self.user
            )));
        }

        *token = Some(data.token);
        tracing::debug!("Acquired token");
        Ok(())
    }
}
