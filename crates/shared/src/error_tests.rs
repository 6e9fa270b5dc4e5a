use crate::error::{AppError, ErrorKind};
use rstest::rstest;

#[rstest]
#[case(AppError::Unauthorized("test".into()), 401, "UNAUTHORIZED")]
#[case(AppError::Forbidden("test".into()), 403, "FORBIDDEN")]
#[case(AppError::NotFound("test".into()), 404, "NOT_FOUND")]
#[case(AppError::Validation("test".into()), 400, "VALIDATION_ERROR")]
#[case(AppError::Conflict("test".into()), 409, "CONFLICT")]
#[case(AppError::Database("test".into()), 500, "DATABASE_ERROR")]
#[case(AppError::ExternalService("test".into()), 500, "EXTERNAL_SERVICE_ERROR")]
#[case(AppError::Internal("test".into()), 500, "INTERNAL_ERROR")]
fn test_app_error_status_and_code(
    #[case] error: AppError,
    #[case] status: u16,
    #[case] code: &str,
) {
    assert_eq!(error.status_code(), status);
    assert_eq!(error.error_code(), code);
}

#[rstest]
#[case(AppError::Validation(String::new()), ErrorKind::Validation)]
#[case(AppError::Conflict(String::new()), ErrorKind::Validation)]
#[case(AppError::Unauthorized(String::new()), ErrorKind::Auth)]
#[case(AppError::Forbidden(String::new()), ErrorKind::Auth)]
#[case(AppError::NotFound(String::new()), ErrorKind::NotFound)]
#[case(AppError::Database(String::new()), ErrorKind::Unknown)]
#[case(AppError::ExternalService(String::new()), ErrorKind::Unknown)]
#[case(AppError::Internal(String::new()), ErrorKind::Unknown)]
fn test_app_error_kind(#[case] error: AppError, #[case] kind: ErrorKind) {
    assert_eq!(error.kind(), kind);
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        format!("{}", AppError::Unauthorized("msg".into())),
        "Authentication failed: msg"
    );
    assert_eq!(
        format!("{}", AppError::Validation("msg".into())),
        "Validation error: msg"
    );
    assert_eq!(
        format!("{}", AppError::Database("msg".into())),
        "Database error: msg"
    );
}

#[test]
fn test_public_message_hides_unknown_details() {
    let err = AppError::Database("connection refused at 10.0.0.5:5432".into());
    assert_eq!(err.public_message(), "Something went wrong");

    let err = AppError::Validation("amount must be non-negative".into());
    assert_eq!(err.public_message(), "amount must be non-negative");
}
