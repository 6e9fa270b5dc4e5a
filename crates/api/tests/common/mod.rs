//! Shared harness for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tally_api::{AppState, create_router};
use tally_db::connect_in_memory;
use tally_shared::{
    ExternalIdentity, IdentityVerifier, JwtConfig, JwtService, OAuthError,
};
use tower::ServiceExt;
use uuid::Uuid;

/// The only Google ID token the stub verifier accepts.
pub const GOOGLE_TOKEN: &str = "valid-google-token";
/// Email asserted by [`GOOGLE_TOKEN`].
pub const GOOGLE_EMAIL: &str = "google.user@example.com";

/// Accepts [`GOOGLE_TOKEN`] and rejects everything else.
pub struct StubVerifier;

#[async_trait]
impl IdentityVerifier for StubVerifier {
    async fn verify(&self, id_token: &str) -> Result<ExternalIdentity, OAuthError> {
        if id_token == GOOGLE_TOKEN {
            Ok(ExternalIdentity {
                subject: "google-sub-123".to_string(),
                email: GOOGLE_EMAIL.to_string(),
                name: Some("Google User".to_string()),
            })
        } else {
            Err(OAuthError::Rejected("400 Bad Request".to_string()))
        }
    }
}

/// A full router over a fresh in-memory database.
pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

/// A registered user and one of their bearer tokens.
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = connect_in_memory().await.expect("Failed to open test database");
        let state = AppState {
            db: Arc::new(db.clone()),
            jwt_service: Arc::new(JwtService::new(JwtConfig {
                secret: "api-test-secret".to_string(),
                access_token_expires_secs: 3600,
            })),
            identity_verifier: Arc::new(StubVerifier),
        };

        Self {
            router: create_router(state),
            db,
        }
    }

    /// Sends a request and returns the status and JSON body (`Null` if not JSON).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    /// Registers a user with fake name and email.
    pub async fn register(&self) -> TestUser {
        let name: String = Name().fake();
        let email = format!("{}-{}", Uuid::new_v4().simple(), SafeEmail().fake::<String>());
        let password = "correct-horse-battery".to_string();

        let (status, body) = self
            .post(
                "/api/register",
                None,
                json!({ "name": name, "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        TestUser {
            id: body["user"]["id"].as_str().unwrap().to_string(),
            email,
            password,
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Logs in again, returning a second token for the same user.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post(
                "/api/login",
                None,
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Records a transaction and returns its JSON.
    pub async fn record(
        &self,
        token: &str,
        transaction_type: &str,
        category: &str,
        amount: i64,
        date: &str,
    ) -> Value {
        let (status, body) = self
            .post(
                "/api/transactions",
                Some(token),
                json!({
                    "type": transaction_type,
                    "category": category,
                    "amount": amount,
                    "date": date
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["transaction"].clone()
    }
}
