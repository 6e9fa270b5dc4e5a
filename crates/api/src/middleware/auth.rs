//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tally_core::auth::UserRole;
use tally_db::SessionRepository;
use tally_shared::{AppError, Claims};
use tracing::{debug, warn};

use crate::{AppState, error::ApiError};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn unauthenticated() -> ApiError {
    ApiError(AppError::Unauthorized("Unauthenticated.".to_string()))
}

/// Authentication middleware that validates bearer tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the JWT signature and expiry
/// 3. Checks the token's session is live and bound to this exact token
/// 4. Stores the claims in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or_else(unauthenticated)?;

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        debug!(error = %e, "Rejected bearer token");
        unauthenticated()
    })?;

    let sessions = SessionRepository::new((*state.db).clone());
    let session = sessions
        .find_active(claims.session_id(), token)
        .await?
        .filter(|s| s.user_id == claims.user_id())
        .ok_or_else(|| {
            debug!(session_id = %claims.session_id(), "Session revoked, expired or unknown");
            unauthenticated()
        })?;

    if let Err(e) = sessions.touch(session.id).await {
        warn!(error = %e, session_id = %session.id, "Failed to record session use");
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Extractor for authenticated user claims.
///
/// Use this in handlers to get the authenticated user's claims:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub fn user_id(&self) -> uuid::Uuid {
        self.0.user_id()
    }

    /// Returns the session the request's token belongs to.
    #[must_use]
    pub fn session_id(&self) -> uuid::Uuid {
        self.0.session_id()
    }

    /// Returns the user's role.
    #[must_use]
    pub fn role(&self) -> UserRole {
        UserRole::from_db(&self.0.role)
    }

    /// Returns the inner claims.
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(unauthenticated)
    }
}
