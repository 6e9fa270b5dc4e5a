//! Session repository for database operations.
//!
//! Each issued bearer token owns one session row. Only the SHA-256 hash of
//! the token is stored.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    prelude::DateTimeWithTimeZone, sea_query::Expr,
};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::entities::sessions;

/// Session repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    /// Creates a new session repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Hashes a bearer token for storage.
    #[must_use]
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Creates a new session.
    ///
    /// `name` labels how the token was obtained (`"auth"` or `"google"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        id: Uuid,
        user_id: Uuid,
        name: &str,
        token: &str,
        expires_at: DateTime<Utc>,
        user_agent: Option<&str>,
    ) -> Result<sessions::Model, DbErr> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let session = sessions::ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            name: Set(name.to_string()),
            token_hash: Set(Self::hash_token(token)),
            user_agent: Set(user_agent.map(String::from)),
            expires_at: Set(expires_at.into()),
            revoked_at: Set(None),
            last_used_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        session.insert(&self.db).await
    }

    /// Finds a session that is usable with `token`: not revoked, not expired,
    /// and bound to the token's hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active(
        &self,
        id: Uuid,
        token: &str,
    ) -> Result<Option<sessions::Model>, DbErr> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        sessions::Entity::find_by_id(id)
            .filter(sessions::Column::TokenHash.eq(Self::hash_token(token)))
            .filter(sessions::Column::RevokedAt.is_null())
            .filter(sessions::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
    }

    /// Records that the session was just used.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn touch(&self, id: Uuid) -> Result<(), DbErr> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        sessions::Entity::update_many()
            .col_expr(sessions::Column::LastUsedAt, Expr::value(now))
            .filter(sessions::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// Revokes a session. Returns `false` if it was missing or already revoked.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn revoke(&self, id: Uuid) -> Result<bool, DbErr> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let result = sessions::Entity::update_many()
            .col_expr(sessions::Column::RevokedAt, Expr::value(now))
            .col_expr(sessions::Column::UpdatedAt, Expr::value(now))
            .filter(sessions::Column::Id.eq(id))
            .filter(sessions::Column::RevokedAt.is_null())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Revokes all sessions for a user, optionally sparing one (the caller's own).
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn revoke_all_for_user(
        &self,
        user_id: Uuid,
        except: Option<Uuid>,
    ) -> Result<u64, DbErr> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let mut query = sessions::Entity::update_many()
            .col_expr(sessions::Column::RevokedAt, Expr::value(now))
            .col_expr(sessions::Column::UpdatedAt, Expr::value(now))
            .filter(sessions::Column::UserId.eq(user_id))
            .filter(sessions::Column::RevokedAt.is_null());

        if let Some(keep) = except {
            query = query.filter(sessions::Column::Id.ne(keep));
        }

        let result = query.exec(&self.db).await?;

        Ok(result.rows_affected)
    }

    /// Deletes expired sessions (for maintenance).
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_expired(&self) -> Result<u64, DbErr> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::ExpiresAt.lt(now))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
