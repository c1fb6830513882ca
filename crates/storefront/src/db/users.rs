//! User repository for database operations.
//!
//! Queries run at runtime (no compile-time verification) so the crate builds
//! without a live database; the schema is pinned by the migrations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use clearcart_core::{Email, FileId, UserId};

use super::RepositoryError;
use crate::models::user::User;

/// Database row for `storefront.user`.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    avatar_file_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            name: self.name,
            email,
            avatar_file_id: self.avatar_file_id.map(FileId::from),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SELECT_USER: &str = r#"
    SELECT id, name, email, avatar_file_id, created_at, updated_at
    FROM storefront."user"
"#;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Create a new user with name, email, and password hash.
    ///
    /// The user row and its password row are written in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO storefront."user" (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, avatar_file_id, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        let user = row.into_user()?;

        sqlx::query(
            r"
            INSERT INTO storefront.user_password (user_id, password_hash)
            VALUES ($1, $2)
            ",
        )
        .bind(user.id.as_i32())
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user)
    }

    /// Get a user's password hash by email.
    ///
    /// Returns `None` if the user doesn't exist or has no password set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserPasswordRow>(
            r#"
            SELECT u.id, u.name, u.email, u.avatar_file_id, u.created_at, u.updated_at,
                   p.password_hash
            FROM storefront."user" u
            JOIN storefront.user_password p ON u.id = p.user_id
            WHERE u.email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let password_hash = r.password_hash.clone();
        let user = r.into_user()?;

        Ok(Some((user, password_hash)))
    }

    /// Set a user's avatar file reference and return the updated user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_avatar_file(
        &self,
        user_id: UserId,
        file_id: FileId,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE storefront."user"
            SET avatar_file_id = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, name, email, avatar_file_id, created_at, updated_at
            "#,
        )
        .bind(file_id.as_uuid())
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_user()
    }
}

/// Database row for a user joined with their password hash.
#[derive(sqlx::FromRow)]
struct UserPasswordRow {
    id: i32,
    name: String,
    email: String,
    avatar_file_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    password_hash: String,
}

impl UserPasswordRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        UserRow {
            id: self.id,
            name: self.name,
            email: self.email,
            avatar_file_id: self.avatar_file_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_user()
    }
}
