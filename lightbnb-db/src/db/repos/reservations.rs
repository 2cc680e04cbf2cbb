//! Reservation repository
//!
//! Lists a guest's reservations with the booked property in one query
//! (JOIN + LEFT JOIN for the rating, no N+1).

use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use super::log_failure;
use crate::error::Result;
use crate::models::{GuestReservation, Limit, Property, Reservation};

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a guest's reservations, earliest start date first.
    ///
    /// Properties without reviews are included with `average_rating: None`.
    #[instrument(skip(self))]
    pub async fn list_for_guest(
        &self,
        guest_id: i32,
        limit: Limit,
    ) -> Result<Vec<GuestReservation>> {
        let rows = sqlx::query(
            r#"
            SELECT
                reservations.id AS reservation_id,
                reservations.guest_id,
                reservations.property_id,
                reservations.start_date,
                reservations.end_date,
                properties.*,
                avg(property_reviews.rating)::float8 AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            LEFT JOIN property_reviews ON properties.id = property_reviews.property_id
            WHERE reservations.guest_id = $1
            GROUP BY properties.id, reservations.id
            ORDER BY reservations.start_date, reservations.id
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(limit.as_i64())
        .fetch_all(self.pool)
        .await
        .inspect_err(log_failure("list reservations for guest"))?;

        let items = rows
            .iter()
            .map(|r| -> std::result::Result<GuestReservation, sqlx::Error> {
                Ok(GuestReservation {
                    reservation: Reservation {
                        id: r.try_get("reservation_id")?,
                        guest_id: r.try_get("guest_id")?,
                        property_id: r.try_get("property_id")?,
                        start_date: r.try_get("start_date")?,
                        end_date: r.try_get("end_date")?,
                    },
                    property: Property::from_row(r)?,
                    average_rating: r.try_get("average_rating")?,
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .inspect_err(log_failure("decode guest reservation"))?;

        Ok(items)
    }
}
