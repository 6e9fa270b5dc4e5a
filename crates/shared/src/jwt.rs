//! JWT token generation and validation.
//!
//! Tokens are bound to a session row; the JWT proves integrity and expiry, the
//! session row provides revocation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Claims;

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token lifetime in seconds.
    pub access_token_expires_secs: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            access_token_expires_secs: 7 * 24 * 60 * 60,
        }
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// A freshly issued token with the metadata needed to persist its session.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded bearer token.
    pub token: String,
    /// Session the token is bound to.
    pub session_id: Uuid,
    /// Expiration time.
    pub expires_at: DateTime<Utc>,
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expires_secs", &self.config.access_token_expires_secs)
            .field("secret", &"[hidden]")
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues a bearer token for a new session of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails or the
    /// configured lifetime does not fit a timestamp.
    pub fn issue(&self, user_id: Uuid, role: &str) -> Result<IssuedToken, JwtError> {
        let session_id = Uuid::new_v4();
        let expires_at = Duration::try_seconds(self.config.access_token_expires_secs)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| JwtError::EncodingError("token lifetime out of range".to_string()))?;
        let claims = Claims::new(user_id, session_id, role, expires_at);

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok(IssuedToken {
            token,
            session_id,
            expires_at,
        })
    }

    /// Validates and decodes a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::DecodingError` if the token is malformed or forged.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }

    /// Returns the token lifetime in seconds.
    #[must_use]
    pub const fn expires_in(&self) -> i64 {
        self.config.access_token_expires_secs
    }
}

impl From<JwtError> for crate::AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => Self::Unauthorized("Token has expired".to_string()),
            JwtError::DecodingError(_) => {
                Self::Unauthorized("Invalid or malformed token".to_string())
            }
            JwtError::EncodingError(msg) => Self::Internal(msg),
        }
    }
}
