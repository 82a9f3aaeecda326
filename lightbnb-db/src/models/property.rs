use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{DbError, Result};

/// Property record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Property {
    pub id: i32,
    pub owner_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Price per night in cents
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

/// Property with its aggregated review rating, as returned by search
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PropertyView {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: f64,
}

/// Payload for listing a property.
///
/// The 13 attribute fields are bound in the fixed column order used by
/// `PropertyRepo::add`; `owner_id` is optional and nothing here checks that
/// the owner exists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProperty {
    #[serde(default)]
    pub owner_id: Option<i32>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: i32,
    pub parking_spaces: i32,
    pub cost_per_night: i32,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub street: String,
    pub country: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

/// Optional search filters; every `None` field is left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyFilter {
    /// Case-insensitive substring of the city name
    pub city: Option<String>,
    pub owner_id: Option<i32>,
    /// Inclusive lower bound on `cost_per_night`
    pub minimum_price_per_night: Option<i32>,
    /// Inclusive upper bound on `cost_per_night`
    pub maximum_price_per_night: Option<i32>,
    /// Inclusive lower bound on the average review rating
    pub minimum_rating: Option<f64>,
}

impl PropertyFilter {
    /// Filter on city only.
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Self::default()
        }
    }

    /// Filter on owner only.
    pub fn owner(owner_id: i32) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }

    /// Reject values no row can be compared against.
    pub fn validate(&self) -> Result<()> {
        match self.minimum_rating {
            Some(rating) if !rating.is_finite() => Err(DbError::InvalidFilter(format!(
                "minimum_rating must be finite, got {rating}"
            ))),
            _ => Ok(()),
        }
    }

    /// City term to search for, ignoring a blank search box.
    pub fn city_term(&self) -> Option<&str> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_city_is_ignored() {
        assert_eq!(PropertyFilter::city("   ").city_term(), None);
        assert_eq!(PropertyFilter::city("").city_term(), None);
        assert_eq!(
            PropertyFilter::city(" Vancouver ").city_term(),
            Some("Vancouver")
        );
    }

    #[test]
    fn validate_rejects_non_finite_rating() {
        let nan = PropertyFilter {
            minimum_rating: Some(f64::NAN),
            ..PropertyFilter::default()
        };
        let err = nan.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid filter: minimum_rating must be finite, got NaN"
        );

        let four = PropertyFilter {
            minimum_rating: Some(4.0),
            ..PropertyFilter::default()
        };
        assert!(four.validate().is_ok());
        assert!(PropertyFilter::default().validate().is_ok());
    }

    #[test]
    fn filter_deserializes_with_missing_fields() {
        let filter: PropertyFilter =
            serde_json::from_str(r#"{"city": "Calgary", "minimum_rating": 4}"#).expect("parses");
        assert_eq!(filter.city.as_deref(), Some("Calgary"));
        assert_eq!(filter.minimum_rating, Some(4.0));
        assert_eq!(filter.owner_id, None);
    }

    #[test]
    fn new_property_accepts_missing_owner_and_description() {
        let property: NewProperty = serde_json::from_str(
            r#"{
                "title": "Speed lamp",
                "number_of_bedrooms": 3,
                "number_of_bathrooms": 2,
                "parking_spaces": 1,
                "cost_per_night": 93061,
                "thumbnail_photo_url": "https://images.example/thumb.jpg",
                "cover_photo_url": "https://images.example/cover.jpg",
                "street": "536 Namsub Highway",
                "country": "Canada",
                "city": "Sotboske",
                "province": "Quebec",
                "post_code": "28142"
            }"#,
        )
        .expect("parses");

        assert_eq!(property.owner_id, None);
        assert_eq!(property.description, None);
        assert_eq!(property.cost_per_night, 93061);
    }

    #[test]
    fn property_view_serializes_flat() {
        let view = PropertyView {
            property: Property {
                id: 1,
                owner_id: Some(3),
                title: "Blank corner".to_string(),
                description: None,
                thumbnail_photo_url: "t".to_string(),
                cover_photo_url: "c".to_string(),
                cost_per_night: 85234,
                parking_spaces: 6,
                number_of_bathrooms: 6,
                number_of_bedrooms: 7,
                country: "Canada".to_string(),
                street: "651 Nami Road".to_string(),
                city: "Bohbatev".to_string(),
                province: "Alberta".to_string(),
                post_code: "83680".to_string(),
            },
            average_rating: 4.5,
        };

        let json = serde_json::to_value(&view).expect("serializes");
        assert_eq!(json["title"], "Blank corner");
        assert_eq!(json["average_rating"], 4.5);
        assert!(json.get("property").is_none());
    }
}
