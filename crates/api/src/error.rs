//! Error responses.
//!
//! Every failure leaves the API as `{ "status": "error", "error": <code>, "message": ... }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tally_core::{auth::PasswordError, ledger::LedgerError};
use tally_db::UserError;
use tally_shared::{AppError, ErrorKind, JwtError, OAuthError};

/// [`AppError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.kind() == ErrorKind::Unknown {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = Json(json!({
            "status": "error",
            "error": self.0.error_code(),
            "message": self.0.public_message(),
        }));

        (status, body).into_response()
    }
}

macro_rules! into_api_error {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for ApiError {
                fn from(err: $source) -> Self {
                    Self(AppError::from(err))
                }
            }
        )*
    };
}

into_api_error!(
    LedgerError,
    PasswordError,
    JwtError,
    OAuthError,
    validator::ValidationErrors,
);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateEmail(_) => Self(AppError::Conflict(
                "The email has already been taken.".to_string(),
            )),
            UserError::Database(e) => e.into(),
        }
    }
}
