//! User account routes. A user may manage only themselves unless they are an admin.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::{Value, json};
use tally_core::auth::hash_password;
use tally_db::{SessionRepository, UserChanges, UserRepository};
use tally_shared::{
    AppError,
    auth::{UpdateUserRequest, UserInfo},
};
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, extractors::ValidatedJson, middleware::AuthUser};

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/{id}", get(show).put(update).delete(destroy))
}

fn not_found() -> ApiError {
    ApiError(AppError::NotFound("User not found".to_string()))
}

/// Parses the path id and checks the caller may act on it.
fn authorize(auth: &AuthUser, raw_id: &str) -> Result<Uuid, ApiError> {
    let id = Uuid::parse_str(raw_id).map_err(|_| not_found())?;

    if !auth.role().can_manage_user(auth.user_id(), id) {
        return Err(AppError::Forbidden("This action is unauthorized.".to_string()).into());
    }

    Ok(id)
}

/// GET /users/{id}
async fn show(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = authorize(&auth, &id)?;

    let user = UserRepository::new((*state.db).clone())
        .find_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    let user: UserInfo = user.into();
    Ok(Json(json!({ "status": "success", "user": user })))
}

/// PUT /users/{id}
async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = authorize(&auth, &id)?;
    let user_repo = UserRepository::new((*state.db).clone());

    if let Some(email) = &payload.email
        && let Some(owner) = user_repo.find_by_email(email).await?
        && owner.id != id
    {
        return Err(AppError::Conflict("The email has already been taken.".to_string()).into());
    }

    let password_hash = payload.password.as_deref().map(hash_password).transpose()?;
    let password_changed = password_hash.is_some();

    let user = user_repo
        .update(
            id,
            UserChanges {
                name: payload.name.map(|n| n.trim().to_string()),
                email: payload.email,
                password_hash,
            },
        )
        .await?
        .ok_or_else(not_found)?;

    if password_changed {
        // Keep the caller signed in when they change their own password.
        let keep = (auth.user_id() == id).then(|| auth.session_id());
        let revoked = SessionRepository::new((*state.db).clone())
            .revoke_all_for_user(id, keep)
            .await?;
        info!(user_id = %id, revoked, "Sessions revoked after password change");
    }

    info!(user_id = %id, actor = %auth.user_id(), "User updated");

    let user: UserInfo = user.into();
    Ok(Json(json!({
        "status": "success",
        "message": "User updated successfully",
        "user": user
    })))
}

/// DELETE /users/{id} - Removes the user, their sessions and their transactions.
async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = authorize(&auth, &id)?;

    if !UserRepository::new((*state.db).clone()).delete(id).await? {
        return Err(not_found());
    }

    info!(user_id = %id, actor = %auth.user_id(), "User deleted");

    Ok(Json(json!({
        "status": "success",
        "message": "User deleted successfully"
    })))
}
