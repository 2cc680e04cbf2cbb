//! Review repository (read-only)

use sqlx::PgPool;
use tracing::instrument;

use super::log_failure;
use crate::error::Result;
use crate::models::PropertyReview;

pub struct ReviewRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reviews left for one property, oldest first.
    #[instrument(skip(self))]
    pub async fn list_for_property(&self, property_id: i32) -> Result<Vec<PropertyReview>> {
        let reviews = sqlx::query_as::<_, PropertyReview>(
            r#"
            SELECT id, property_id, rating
            FROM property_reviews
            WHERE property_id = $1
            ORDER BY id
            "#,
        )
        .bind(property_id)
        .fetch_all(self.pool)
        .await
        .inspect_err(log_failure("list reviews for property"))?;

        Ok(reviews)
    }
}
