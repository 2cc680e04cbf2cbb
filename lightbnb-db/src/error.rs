//! Error types for lightbnb-db

use thiserror::Error;

use crate::models::ValidationError;

pub type Result<T> = std::result::Result<T, DbError>;

/// Failure of a data-access operation.
///
/// A lookup that finds nothing is `Ok(None)`, never an error.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl DbError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }

    /// True when the database rejected the row over a constraint
    /// (unique, foreign key, check).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Sqlx(sqlx::Error::Database(db)) => db.constraint().is_some(),
            _ => false,
        }
    }
}
