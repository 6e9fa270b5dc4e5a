//! Google sign-in: exchanging a Google ID token for a verified identity.
//!
//! Uses `reqwest` against Google's `tokeninfo` endpoint, which checks the
//! token signature and expiry for us. We still check the audience and email.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{AppError, config::GoogleConfig};

/// Errors raised while verifying a third-party identity token.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The provider rejected the token.
    #[error("identity token rejected: {0}")]
    Rejected(String),

    /// The token was issued for another client.
    #[error("identity token audience mismatch")]
    AudienceMismatch,

    /// The token does not carry a usable email.
    #[error("identity token has no verified email")]
    EmailNotVerified,

    /// The provider could not be reached or answered garbage.
    #[error("identity provider unavailable: {0}")]
    Transport(String),

    /// No client ID configured.
    #[error("google sign-in is not configured")]
    NotConfigured,
}

impl From<OAuthError> for AppError {
    fn from(err: OAuthError) -> Self {
        match err {
            OAuthError::Rejected(_) | OAuthError::AudienceMismatch | OAuthError::EmailNotVerified => {
                Self::Unauthorized("Invalid ID token".to_string())
            }
            OAuthError::Transport(msg) => Self::ExternalService(msg),
            OAuthError::NotConfigured => {
                Self::Internal("google sign-in is not configured".to_string())
            }
        }
    }
}

/// Identity asserted by an external provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    /// Provider-specific subject identifier.
    pub subject: String,
    /// Verified email address.
    pub email: String,
    /// Display name, if the provider shared one.
    pub name: Option<String>,
}

/// Verifies third-party identity tokens.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verifies `id_token` and returns the identity it asserts.
    async fn verify(&self, id_token: &str) -> Result<ExternalIdentity, OAuthError>;
}

/// Fields of the `tokeninfo` response we care about.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: Option<String>,
    sub: Option<String>,
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<Value>,
    name: Option<String>,
}

/// Google ID token verifier backed by the `tokeninfo` endpoint.
#[derive(Debug, Clone)]
pub struct GoogleVerifier {
    http: reqwest::Client,
    config: GoogleConfig,
}

impl GoogleVerifier {
    /// Creates a verifier for the configured client.
    #[must_use]
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl IdentityVerifier for GoogleVerifier {
    async fn verify(&self, id_token: &str) -> Result<ExternalIdentity, OAuthError> {
        if self.config.client_id.is_empty() {
            return Err(OAuthError::NotConfigured);
        }

        let response = self
            .http
            .get(&self.config.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| OAuthError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            tracing::info!(status = %response.status(), "Google rejected ID token");
            return Err(OAuthError::Rejected(response.status().to_string()));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| OAuthError::Transport(e.to_string()))?;

        identity_from_token_info(info, &self.config.client_id)
    }
}

fn identity_from_token_info(
    info: TokenInfo,
    client_id: &str,
) -> Result<ExternalIdentity, OAuthError> {
    if info.aud.as_deref() != Some(client_id) {
        return Err(OAuthError::AudienceMismatch);
    }

    let verified = match info.email_verified {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    };

    let (Some(email), Some(subject)) = (info.email, info.sub) else {
        return Err(OAuthError::EmailNotVerified);
    };

    if !verified || email.is_empty() {
        return Err(OAuthError::EmailNotVerified);
    }

    Ok(ExternalIdentity {
        subject,
        email,
        name: info.name.filter(|n| !n.is_empty()),
    })
}
