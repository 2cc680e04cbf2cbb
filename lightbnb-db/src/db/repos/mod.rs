//! Repository implementations for database access
//!
//! Each repository borrows the shared pool and issues exactly one statement
//! per call. Failures are logged here, where the operation name is known,
//! and returned to the caller as `DbError`.

pub mod properties;
pub mod reservations;
pub mod reviews;
pub mod users;

pub use properties::PropertyRepo;
pub use reservations::ReservationRepo;
pub use reviews::ReviewRepo;
pub use users::UserRepo;

/// Log a failed query with the operation that issued it.
pub(crate) fn log_failure(operation: &'static str) -> impl FnOnce(&sqlx::Error) {
    move |err: &sqlx::Error| tracing::error!(operation, error = %err, "query failed")
}
