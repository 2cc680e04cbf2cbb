//! Property repository
//!
//! - search: filtered listing built by [`PropertySearch`]
//! - create: INSERT of a validated listing, always active

use sqlx::PgPool;
use tracing::{debug, instrument};

use super::log_failure;
use crate::error::Result;
use crate::models::{Limit, NewProperty, Property, PropertyFilter, PropertyWithRating};
use crate::search::PropertySearch;

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search properties, cheapest first, each with its average rating.
    #[instrument(skip_all, fields(limit = limit.get()))]
    pub async fn search(
        &self,
        filter: &PropertyFilter,
        limit: Limit,
    ) -> Result<Vec<PropertyWithRating>> {
        filter.validate()?;

        let search = PropertySearch::new(filter, limit);
        let mut query = search.build();
        debug!(sql = query.sql(), params = search.params().len(), "property search");

        let rows = query
            .build_query_as::<PropertyWithRating>()
            .fetch_all(self.pool)
            .await
            .inspect_err(log_failure("search properties"))?;

        debug!(rows = rows.len(), "property search complete");
        Ok(rows)
    }

    /// Add a listing. `active` is always stored as true.
    #[instrument(skip_all, fields(owner_id = property.fields().owner_id))]
    pub async fn create(&self, property: &NewProperty) -> Result<Property> {
        let p = property.fields();

        let created = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                title,
                description,
                owner_id,
                cover_photo_url,
                thumbnail_photo_url,
                cost_per_night,
                parking_spaces,
                number_of_bathrooms,
                number_of_bedrooms,
                active,
                province,
                city,
                country,
                street,
                post_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&p.title)
        .bind(&p.description)
        .bind(p.owner_id)
        .bind(&p.cover_photo_url)
        .bind(&p.thumbnail_photo_url)
        .bind(p.cost_per_night)
        .bind(p.parking_spaces)
        .bind(p.number_of_bathrooms)
        .bind(p.number_of_bedrooms)
        .bind(true)
        .bind(&p.province)
        .bind(&p.city)
        .bind(&p.country)
        .bind(&p.street)
        .bind(&p.post_code)
        .fetch_one(self.pool)
        .await
        .inspect_err(log_failure("create property"))?;

        debug!(property_id = created.id, "created property");
        Ok(created)
    }
}
