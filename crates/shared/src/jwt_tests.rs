//! Unit tests for JWT functionality.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use crate::{
    AppError, Claims,
    jwt::{JwtConfig, JwtError, JwtService},
};

const SECRET: &str = "test-secret-key-for-testing";

fn create_test_service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: SECRET.to_string(),
        access_token_expires_secs: 900,
    })
}

#[test]
fn test_claims_new_sets_correct_fields() {
    let user_id = Uuid::new_v4();
    let session_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(user_id, session_id, "user", expires_at);

    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.session_id(), session_id);
    assert_eq!(claims.role, "user");
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_issue_and_validate_round_trip() {
    let service = create_test_service();
    let user_id = Uuid::new_v4();

    let issued = service.issue(user_id, "admin").unwrap();
    let claims = service.validate_token(&issued.token).unwrap();

    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.session_id(), issued.session_id);
    assert_eq!(claims.role, "admin");
    assert_eq!(claims.exp, issued.expires_at.timestamp());
}

#[test]
fn test_each_issue_gets_its_own_session() {
    let service = create_test_service();
    let user_id = Uuid::new_v4();

    let first = service.issue(user_id, "user").unwrap();
    let second = service.issue(user_id, "user").unwrap();

    assert_ne!(first.session_id, second.session_id);
    assert_ne!(first.token, second.token);
}

#[test]
fn test_invalid_token() {
    let service = create_test_service();
    let result = service.validate_token("invalid.token.here");
    assert!(matches!(result, Err(JwtError::DecodingError(_))));
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let other = JwtService::new(JwtConfig {
        secret: "another-secret".to_string(),
        access_token_expires_secs: 900,
    });
    let issued = other.issue(Uuid::new_v4(), "user").unwrap();

    let result = create_test_service().validate_token(&issued.token);
    assert!(matches!(result, Err(JwtError::DecodingError(_))));
}

#[test]
fn test_expired_token() {
    let claims = Claims::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "user",
        Utc::now() - Duration::hours(2),
    );
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let result = create_test_service().validate_token(&token);
    assert!(matches!(result, Err(JwtError::Expired)));
}

#[test]
fn test_jwt_errors_map_to_unauthorized() {
    assert!(matches!(
        AppError::from(JwtError::Expired),
        AppError::Unauthorized(_)
    ));
    assert!(matches!(
        AppError::from(JwtError::DecodingError("bad".into())),
        AppError::Unauthorized(_)
    ));
    assert!(matches!(
        AppError::from(JwtError::EncodingError("bad".into())),
        AppError::Internal(_)
    ));
}

#[test]
fn test_expires_in_seconds() {
    assert_eq!(create_test_service().expires_in(), 900);
}

#[test]
fn test_sub_minute_lifetime_is_kept() {
    let service = JwtService::new(JwtConfig {
        secret: SECRET.to_string(),
        access_token_expires_secs: 90,
    });
    let before = Utc::now();

    let issued = service.issue(Uuid::new_v4(), "user").unwrap();
    let lifetime = (issued.expires_at - before).num_seconds();

    assert!((89..=90).contains(&lifetime), "lifetime was {lifetime}s");
    assert_eq!(service.expires_in(), 90);
    assert!(service.validate_token(&issued.token).is_ok());
}

#[test]
fn test_out_of_range_lifetime_is_an_error() {
    let service = JwtService::new(JwtConfig {
        secret: SECRET.to_string(),
        access_token_expires_secs: i64::MAX,
    });

    assert!(matches!(
        service.issue(Uuid::new_v4(), "user"),
        Err(JwtError::EncodingError(_))
    ));
}
