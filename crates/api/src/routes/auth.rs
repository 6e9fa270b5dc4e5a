//! Authentication routes: register, login, Google token exchange and logout.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Value, json};
use tally_core::auth::{UserRole, hash_password, unusable_password_hash, verify_password};
use tally_db::{SessionRepository, UserRepository, entities::users};
use tally_shared::{
    AppError,
    auth::{AuthResponse, GoogleExchangeRequest, LoginRequest, RegisterRequest, UserInfo},
};
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    extractors::{JsonBody, ValidatedJson},
    middleware::AuthUser,
};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/auth/google-exchange", post(google_exchange))
}

/// Creates the auth routes that need a bearer token.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/user", get(current_user))
}

/// Response for the Google token exchange.
#[derive(Debug, Serialize)]
pub struct ExchangeResponse {
    /// Bearer token.
    pub token: String,
    /// Token type, always `"bearer"`.
    #[serde(rename = "type")]
    pub token_type: &'static str,
    /// The signed-in user.
    pub user: UserInfo,
}

/// Issues a bearer token for `user` and records its session.
async fn start_session(
    state: &AppState,
    user: &users::Model,
    name: &str,
    headers: &HeaderMap,
) -> Result<String, ApiError> {
    let issued = state.jwt_service.issue(user.id, &user.role)?;
    let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok());

    SessionRepository::new((*state.db).clone())
        .create(
            issued.session_id,
            user.id,
            name,
            &issued.token,
            issued.expires_at,
            user_agent,
        )
        .await?;

    Ok(issued.token)
}

/// POST /register - Register a new user.
async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let user_repo = UserRepository::new((*state.db).clone());

    if user_repo.email_exists(&payload.email).await? {
        return Err(AppError::Conflict("The email has already been taken.".to_string()).into());
    }

    let password_hash = hash_password(&payload.password)?;
    let user = user_repo
        .create(
            payload.name.trim(),
            &payload.email,
            &password_hash,
            UserRole::User,
        )
        .await?;

    let token = start_session(&state, &user, "auth", &headers).await?;

    info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new(
            "User registered successfully",
            user.into(),
            token,
        )),
    ))
}

/// POST /login - Authenticate with email and password.
async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let invalid = || ApiError(AppError::Unauthorized("Invalid credentials".to_string()));

    let Some(user) = UserRepository::new((*state.db).clone())
        .find_by_email(&payload.email)
        .await?
    else {
        info!(email = %payload.email, "Login attempt for non-existent user");
        return Err(invalid());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(invalid());
    }

    let token = start_session(&state, &user, "auth", &headers).await?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse::new("Login successful", user.into(), token)))
}

/// POST /auth/google-exchange - Trade a Google ID token for a bearer token.
async fn google_exchange(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<GoogleExchangeRequest>,
) -> Result<Json<ExchangeResponse>, ApiError> {
    let Some(id_token) = payload.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    else {
        return Err(AppError::Validation("The token field is required.".to_string()).into());
    };

    let identity = state.identity_verifier.verify(id_token).await?;

    let user = UserRepository::new((*state.db).clone())
        .find_or_create_by_email(&identity, &unusable_password_hash()?)
        .await?;

    let token = start_session(&state, &user, "google", &headers).await?;

    info!(user_id = %user.id, "User signed in with Google");

    Ok(Json(ExchangeResponse {
        token,
        token_type: "bearer",
        user: user.into(),
    }))
}

/// POST /logout - Revoke the token used for this request.
async fn logout(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Value>, ApiError> {
    SessionRepository::new((*state.db).clone())
        .revoke(auth.session_id())
        .await?;

    info!(user_id = %auth.user_id(), session_id = %auth.session_id(), "User logged out");

    Ok(Json(json!({
        "status": "success",
        "message": "Logged out successfully"
    })))
}

/// GET /user - The authenticated user.
async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserInfo>, ApiError> {
    let user = UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("User not found".to_string())))?;

    Ok(Json(user.into()))
}
