//! Authentication types for JWT and tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// JWT claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Session the token was issued for; revoking it kills the token.
    pub sid: Uuid,
    /// User's role.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user session.
    #[must_use]
    pub fn new(user_id: Uuid, session_id: Uuid, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            sid: session_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the session ID from claims.
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.sid
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// User email.
    #[validate(email(message = "The email must be a valid email address"))]
    pub email: String,
    /// User password.
    #[validate(length(min = 1, message = "The password field is required"))]
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "The name must be 1 to 255 characters"))]
    pub name: String,
    /// User email.
    #[validate(
        email(message = "The email must be a valid email address"),
        length(max = 255, message = "The email may not be greater than 255 characters")
    )]
    pub email: String,
    /// User password.
    #[validate(length(min = 8, message = "The password must be at least 8 characters"))]
    pub password: String,
}

/// Google ID token exchange request.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleExchangeRequest {
    /// The ID token issued by Google to the frontend.
    #[serde(default)]
    pub token: Option<String>,
}

/// Partial user update request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New display name.
    #[validate(length(min = 1, max = 255, message = "The name must be 1 to 255 characters"))]
    pub name: Option<String>,
    /// New email.
    #[validate(
        email(message = "The email must be a valid email address"),
        length(max = 255, message = "The email may not be greater than 255 characters")
    )]
    pub email: Option<String>,
    /// New password.
    #[validate(length(min = 8, message = "The password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// User info returned in API responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// User email.
    pub email: String,
    /// User role.
    pub role: String,
    /// Linked Google account subject.
    pub google_id: Option<String>,
    /// Linked GitHub account ID.
    pub github_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Response body for register and login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    /// Always `"success"`.
    pub status: &'static str,
    /// Human-readable outcome.
    pub message: &'static str,
    /// The authenticated user.
    pub user: UserInfo,
    /// Bearer token.
    pub token: String,
    /// Token type, always `"bearer"`.
    #[serde(rename = "type")]
    pub token_type: &'static str,
}

impl AuthResponse {
    /// Creates a success response carrying a bearer token.
    #[must_use]
    pub const fn new(message: &'static str, user: UserInfo, token: String) -> Self {
        Self {
            status: "success",
            message,
            user,
            token,
            token_type: "bearer",
        }
    }
}
