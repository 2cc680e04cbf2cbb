//! Reservations and reviews (read-only)

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::Property;

/// Reservation record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Reservation {
    pub id: i32,
    pub guest_id: i32,
    pub property_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Reservation {
    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Reservation joined with the booked property, for a guest's trip list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestReservation {
    pub reservation: Reservation,
    pub property: Property,
    pub average_rating: Option<f64>,
}

/// Review record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PropertyReview {
    pub id: i32,
    pub property_id: i32,
    pub rating: i16,
}
