//! Shared types, errors, and configuration for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for users and transactions
//! - Application-wide error types
//! - Configuration management
//! - JWT token service and auth request/response payloads
//! - Google identity-token verification

pub mod auth;
pub mod config;
pub mod error;
pub mod google;
pub mod jwt;
pub mod types;

#[cfg(test)]
mod error_tests;
#[cfg(test)]
mod jwt_tests;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorKind};
pub use google::{ExternalIdentity, GoogleVerifier, IdentityVerifier, OAuthError};
pub use jwt::{JwtConfig, JwtError, JwtService};
