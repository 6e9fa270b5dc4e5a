//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr, TransactionTrait,
};
use tally_core::auth::UserRole;
use tally_shared::ExternalIdentity;
use uuid::Uuid;

use crate::entities::{sessions, transactions, users};

/// Error types for user writes.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Another account already uses this email.
    #[error("Email '{0}' is already taken")]
    DuplicateEmail(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl UserError {
    /// Maps a unique-index violation on write to `DuplicateEmail`.
    ///
    /// `email` is the only unique user column besides the primary key.
    fn from_write(err: DbErr, email: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::DuplicateEmail(email.to_string()),
            _ => Self::Database(err),
        }
    }
}

/// Fields a user update may change. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    /// New display name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New Argon2 password hash.
    pub password_hash: Option<String>,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns `UserError::DuplicateEmail` if the email is taken, including
    /// when a concurrent insert wins the race.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<users::Model, UserError> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.as_str().to_string()),
            google_id: Set(None),
            github_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db)
            .await
            .map_err(|e| UserError::from_write(e, email))
    }

    /// Returns the user owning `identity.email`, creating one if needed.
    ///
    /// A new user gets `password_hash` (expected to be unusable) and the
    /// provider's display name, falling back to the email's local part.
    /// An existing user without a Google link gets `google_id` filled in.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn find_or_create_by_email(
        &self,
        identity: &ExternalIdentity,
        password_hash: &str,
    ) -> Result<users::Model, UserError> {
        if let Some(user) = self.find_by_email(&identity.email).await? {
            if user.google_id.is_some() {
                return Ok(user);
            }

            let mut active: users::ActiveModel = user.into();
            active.google_id = Set(Some(identity.subject.clone()));
            active.updated_at = Set(chrono::Utc::now().into());
            return Ok(active.update(&self.db).await?);
        }

        let name = identity.name.clone().unwrap_or_else(|| {
            identity
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string()
        });

        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(identity.email.clone()),
            password_hash: Set(password_hash.to_string()),
            role: Set(UserRole::User.as_str().to_string()),
            google_id: Set(Some(identity.subject.clone())),
            github_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        tracing::info!(email = %identity.email, "Creating user from external identity");
        user.insert(&self.db)
            .await
            .map_err(|e| UserError::from_write(e, &identity.email))
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Applies `changes` to a user. Returns `None` if the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `UserError::DuplicateEmail` if the new email belongs to
    /// another account.
    pub async fn update(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<users::Model>, UserError> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = &changes.email {
            active.email = Set(email.clone());
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        active
            .update(&self.db)
            .await
            .map(Some)
            .map_err(|e| UserError::from_write(e, changes.email.as_deref().unwrap_or_default()))
    }

    /// Deletes a user along with their sessions and transactions.
    ///
    /// Runs in one database transaction. Returns `false` if the user did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any delete fails; nothing is removed in that case.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        sessions::Entity::delete_many()
            .filter(sessions::Column::UserId.eq(id))
            .exec(&txn)
            .await?;

        transactions::Entity::delete_many()
            .filter(transactions::Column::UserId.eq(id))
            .exec(&txn)
            .await?;

        let result = users::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
