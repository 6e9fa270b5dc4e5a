//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - User role definitions

mod password;

pub use password::{PasswordError, hash_password, unusable_password_hash, verify_password};

use serde::{Deserialize, Serialize};

/// Application-wide user roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular account; sees only its own data.
    #[default]
    User,
    /// May manage other users.
    Admin,
}

impl UserRole {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parses the stored string form. Unknown roles fall back to `User`.
    #[must_use]
    pub fn from_db(role: &str) -> Self {
        match role {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }

    /// Returns true if this role may read or modify `target`'s account.
    #[must_use]
    pub fn can_manage_user(&self, actor: uuid::Uuid, target: uuid::Uuid) -> bool {
        actor == target || matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
