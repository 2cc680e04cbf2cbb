//! Domain models with validation at construction
//!
//! Insert-side input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod filter;
pub mod limit;
pub mod property;
pub mod reservation;
pub mod user;
pub mod validation;

pub use filter::PropertyFilter;
pub use limit::Limit;
pub use property::{NewProperty, Property, PropertyDraft, PropertyWithRating};
pub use reservation::{GuestReservation, PropertyReview, Reservation};
pub use user::{NewUser, User};
pub use validation::ValidationError;
