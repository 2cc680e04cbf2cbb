//! User repository
//!
//! - lookup by email or id: `Ok(None)` when no row matches
//! - create: INSERT ... RETURNING the stored row

use sqlx::PgPool;
use tracing::instrument;

use super::log_failure;
use crate::error::Result;
use crate::models::{NewUser, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a single user by email (exact match).
    ///
    /// Emails are not unique in the schema; the oldest account wins.
    #[instrument(skip_all)]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE users.email = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .inspect_err(log_failure("find user by email"))?;

        Ok(user)
    }

    /// Get a single user by id.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE users.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .inspect_err(log_failure("find user by id"))?;

        Ok(user)
    }

    /// Add a new user, returning the stored record.
    #[instrument(skip_all)]
    pub async fn create(&self, user: &NewUser) -> Result<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(user.name())
        .bind(user.email())
        .bind(user.password())
        .fetch_one(self.pool)
        .await
        .inspect_err(log_failure("create user"))?;

        tracing::debug!(user_id = created.id, "created user");
        Ok(created)
    }
}
