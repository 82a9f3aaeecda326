//! Property repository
//!
//! Handles:
//! - Filtered search with aggregated ratings (see `db::search`)
//! - Insert of a new listing with `RETURNING`
//! - Single lookup by id

use sqlx::PgPool;
use tracing::instrument;

use crate::db::search::PropertySearch;
use crate::error::Result;
use crate::models::{NewProperty, Property, PropertyFilter, PropertyView};

/// Columns of `Property`, in struct order
pub(crate) const PROPERTY_COLUMNS: &[&str] = &[
    "id",
    "owner_id",
    "title",
    "description",
    "thumbnail_photo_url",
    "cover_photo_url",
    "cost_per_night",
    "parking_spaces",
    "number_of_bathrooms",
    "number_of_bedrooms",
    "country",
    "street",
    "city",
    "province",
    "post_code",
];

/// `properties.`-qualified column list for joined queries.
pub(crate) fn qualified_property_columns() -> String {
    PROPERTY_COLUMNS
        .iter()
        .map(|column| format!("properties.{column}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search properties, cheapest first.
    ///
    /// Only properties with at least one review are returned, since the
    /// rating aggregate comes from an inner join.
    #[instrument(level = "debug", skip(self))]
    pub async fn search(&self, filter: &PropertyFilter, limit: u32) -> Result<Vec<PropertyView>> {
        let mut search = PropertySearch::from_filter(filter, limit)?;
        tracing::debug!(sql = %search.sql(), "property search");

        let properties = search.build_query_as().fetch_all(self.pool).await?;

        Ok(properties)
    }

    /// Get a single property by id.
    #[instrument(level = "debug", skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<Property>> {
        let sql = format!(
            "SELECT {} FROM properties WHERE id = $1",
            PROPERTY_COLUMNS.join(", ")
        );

        let property = sqlx::query_as::<_, Property>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(property)
    }

    /// Insert a listing and return the stored row with its generated id.
    ///
    /// No field validation happens here; negative counts or prices are
    /// stored as given unless the schema rejects them.
    #[instrument(level = "debug", skip(self, property), fields(title = %property.title))]
    pub async fn add(&self, property: &NewProperty) -> Result<Property> {
        let sql = format!(
            r#"
            INSERT INTO properties (
                owner_id, title, description, number_of_bedrooms, number_of_bathrooms,
                parking_spaces, cost_per_night, thumbnail_photo_url, cover_photo_url,
                street, country, city, province, post_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            PROPERTY_COLUMNS.join(", ")
        );

        let created = sqlx::query_as::<_, Property>(&sql)
            .bind(property.owner_id)
            .bind(&property.title)
            .bind(property.description.as_deref())
            .bind(property.number_of_bedrooms)
            .bind(property.number_of_bathrooms)
            .bind(property.parking_spaces)
            .bind(property.cost_per_night)
            .bind(&property.thumbnail_photo_url)
            .bind(&property.cover_photo_url)
            .bind(&property.street)
            .bind(&property.country)
            .bind(&property.city)
            .bind(&property.province)
            .bind(&property.post_code)
            .fetch_one(self.pool)
            .await?;

        tracing::debug!(property_id = created.id, "property created");
        Ok(created)
    }
}
