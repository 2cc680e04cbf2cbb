//! Property listings

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{require_non_negative, require_text};
use super::ValidationError;

/// Maximum length for VARCHAR(255) listing columns
const MAX_LISTING_FIELD_LEN: usize = 255;

/// Property record from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub cover_photo_url: String,
    pub thumbnail_photo_url: String,
    /// Nightly price in the smallest currency unit
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub active: bool,
    pub province: String,
    pub city: String,
    pub country: String,
    pub street: String,
    pub post_code: String,
}

/// Property with its average review rating, as returned by search
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PropertyWithRating {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    /// `None` when the property has no reviews
    pub average_ratings: Option<f64>,
}

/// Unvalidated listing fields, as submitted by an owner
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct PropertyDraft {
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_photo_url: String,
    #[serde(default)]
    pub thumbnail_photo_url: String,
    pub cost_per_night: i32,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
    #[serde(default)]
    pub province: String,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub post_code: String,
}

impl PropertyDraft {
    /// Validate the draft into an insertable listing.
    pub fn validate(self) -> Result<NewProperty, ValidationError> {
        if self.owner_id <= 0 {
            return Err(ValidationError::OutOfRange {
                field: "owner_id",
                value: self.owner_id.to_string(),
            });
        }
        require_text("title", &self.title, MAX_LISTING_FIELD_LEN)?;
        require_text("city", &self.city, MAX_LISTING_FIELD_LEN)?;
        require_text("country", &self.country, MAX_LISTING_FIELD_LEN)?;

        for (field, value) in [
            ("cover_photo_url", &self.cover_photo_url),
            ("thumbnail_photo_url", &self.thumbnail_photo_url),
            ("province", &self.province),
            ("street", &self.street),
            ("post_code", &self.post_code),
        ] {
            if value.chars().count() > MAX_LISTING_FIELD_LEN {
                return Err(ValidationError::TooLong {
                    field,
                    max: MAX_LISTING_FIELD_LEN,
                });
            }
        }

        require_non_negative("cost_per_night", self.cost_per_night)?;
        require_non_negative("parking_spaces", self.parking_spaces)?;
        require_non_negative("number_of_bathrooms", self.number_of_bathrooms)?;
        require_non_negative("number_of_bedrooms", self.number_of_bedrooms)?;

        Ok(NewProperty(self))
    }
}

/// Validated listing ready for insertion.
///
/// `active` is not part of the input: new listings are always inserted active.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "PropertyDraft")]
pub struct NewProperty(PropertyDraft);

impl TryFrom<PropertyDraft> for NewProperty {
    type Error = ValidationError;

    fn try_from(draft: PropertyDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl NewProperty {
    pub fn fields(&self) -> &PropertyDraft {
        &self.0
    }
}
