//! Property search filters

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Highest rating a review can carry
pub const MAX_RATING: f64 = 5.0;

/// Optional constraints for a property search.
///
/// Every field is optional; `PropertyFilter::default()` matches every property.
/// The price range only applies when both bounds are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Case-sensitive substring of the city name
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub minimum_price_per_night: Option<i32>,
    #[serde(default)]
    pub maximum_price_per_night: Option<i32>,
    #[serde(default)]
    pub owner_id: Option<i32>,
    /// Inclusive lower bound on the average review rating
    #[serde(default)]
    pub minimum_rating: Option<f64>,
}

impl PropertyFilter {
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn price_between(mut self, min: i32, max: i32) -> Self {
        self.minimum_price_per_night = Some(min);
        self.maximum_price_per_night = Some(max);
        self
    }

    pub fn owner(mut self, owner_id: i32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn minimum_rating(mut self, rating: f64) -> Self {
        self.minimum_rating = Some(rating);
        self
    }

    /// City substring, if one was given and it isn't empty.
    pub fn city_term(&self) -> Option<&str> {
        self.city.as_deref().filter(|c| !c.is_empty())
    }

    /// Inclusive price bounds, present only when both ends are set.
    pub fn price_range(&self) -> Option<(i32, i32)> {
        match (self.minimum_price_per_night, self.maximum_price_per_night) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    /// Check numeric filters before they reach the database.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, price) in [
            ("minimum_price_per_night", self.minimum_price_per_night),
            ("maximum_price_per_night", self.maximum_price_per_night),
        ] {
            if let Some(p) = price {
                if p < 0 {
                    return Err(ValidationError::OutOfRange {
                        field,
                        value: p.to_string(),
                    });
                }
            }
        }

        if let Some(rating) = self.minimum_rating {
            if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
                return Err(ValidationError::OutOfRange {
                    field: "minimum_rating",
                    value: rating.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_range_needs_both_bounds() {
        let only_min = PropertyFilter {
            minimum_price_per_night: Some(100),
            ..Default::default()
        };
        assert_eq!(only_min.price_range(), None);

        let only_max = PropertyFilter {
            maximum_price_per_night: Some(100),
            ..Default::default()
        };
        assert_eq!(only_max.price_range(), None);

        let both = PropertyFilter::default().price_between(100, 500);
        assert_eq!(both.price_range(), Some((100, 500)));
    }

    #[test]
    fn empty_city_is_no_filter() {
        let f = PropertyFilter::default().city("");
        assert_eq!(f.city_term(), None);
        let f = PropertyFilter::default().city("Van");
        assert_eq!(f.city_term(), Some("Van"));
    }

    #[test]
    fn rating_bounds() {
        let check = |rating: f64| PropertyFilter::default().minimum_rating(rating).validate();

        assert!(check(0.0).is_ok());
        assert!(check(5.0).is_ok());
        assert!(check(5.5).is_err());
        assert!(check(-1.0).is_err());
        assert!(check(f64::NAN).is_err());
    }

    #[test]
    fn negative_price_rejected() {
        let f = PropertyFilter {
            minimum_price_per_night: Some(-5),
            ..Default::default()
        };
        assert!(matches!(
            f.validate(),
            Err(ValidationError::OutOfRange {
                field: "minimum_price_per_night",
                ..
            })
        ));
    }

    #[test]
    fn deserializes_partial_object() {
        let f: PropertyFilter = serde_json::from_str(r#"{"city":"Vancouver"}"#).unwrap();
        assert_eq!(f.city.as_deref(), Some("Vancouver"));
        assert_eq!(f.owner_id, None);

        let f: PropertyFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(f, PropertyFilter::default());
    }
}
