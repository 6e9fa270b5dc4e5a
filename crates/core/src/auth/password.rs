//! Password hashing with Argon2id.
//!
//! Uses the recommended Argon2id variant with secure defaults.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use tally_shared::AppError;
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Failed to hash password.
    #[error("failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password.
    #[error("failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format.
    #[error("invalid password hash format")]
    InvalidHash,
}

/// Hashes a password with Argon2id, returning a PHC string.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails.
///
/// ```
/// use tally_core::auth::hash_password;
///
/// let hash = hash_password("correct horse").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Checks `password` against a stored PHC hash.
///
/// A wrong password is `Ok(false)`, not an error.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if `hash` is not a PHC string, or
/// `PasswordError::VerifyError` if verification fails for another reason.
///
/// ```
/// use tally_core::auth::{hash_password, verify_password};
///
/// let hash = hash_password("correct horse").unwrap();
/// assert!(verify_password("correct horse", &hash).unwrap());
/// assert!(!verify_password("battery staple", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

/// Hashes a random secret nobody knows.
///
/// Accounts created through an external identity provider get one of these so
/// the `password_hash` column is never empty yet password login cannot succeed.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails.
pub fn unusable_password_hash() -> Result<String, PasswordError> {
    hash_password(&uuid::Uuid::new_v4().simple().to_string())
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.to_string())
    }
}
