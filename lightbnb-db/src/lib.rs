//! lightbnb-db: data-access layer for a short-term rental site
//!
//! Looks up and creates users, lists a guest's reservations, searches
//! properties with optional filters and inserts new listings, all through
//! parameterized queries against PostgreSQL.
//!
//! ```ignore
//! use lightbnb_db::{create_pool, DbConfig, Limit, PropertyFilter, PropertyRepo};
//!
//! let pool = create_pool(&DbConfig::load()?).await?;
//! let filter = PropertyFilter::default().city("Vancouver").minimum_rating(4.0);
//! let homes = PropertyRepo::new(&pool).search(&filter, Limit::new(5)).await?;
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod search;

pub use config::DbConfig;
pub use db::{
    create_pool, create_pool_from_url, migrate, PropertyRepo, ReservationRepo, ReviewRepo,
    UserRepo,
};
pub use error::{DbError, Result};
pub use models::{
    GuestReservation, Limit, NewProperty, NewUser, Property, PropertyDraft, PropertyFilter,
    PropertyReview, PropertyWithRating, Reservation, User, ValidationError,
};
pub use search::PropertySearch;
pub use sqlx::PgPool;

/// Bundled schema migrations (`migrations/` at the workspace root).
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../migrations");
