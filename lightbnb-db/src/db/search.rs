//! Property search statement builder
//!
//! Clause order is fixed: city, owner, minimum price, maximum price, then
//! `GROUP BY properties.id`, the optional rating `HAVING`, and finally
//! `ORDER BY ... LIMIT`. The first predicate opens the `WHERE`; later ones
//! are joined with `AND`. Each clause is pushed together with its bind, so
//! sqlx numbers the placeholders.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use sqlx::QueryBuilder;

use crate::db::repos::properties::qualified_property_columns;
use crate::error::Result;
use crate::models::{PropertyFilter, PropertyView};

/// Search statement for one filter and row limit
pub struct PropertySearch {
    builder: QueryBuilder<'static, Postgres>,
    has_predicate: bool,
}

impl PropertySearch {
    /// Build the statement for `filter`, capped at `limit` rows.
    ///
    /// Fails with `DbError::InvalidFilter` when the filter cannot match
    /// anything meaningful, e.g. a NaN rating.
    pub fn from_filter(filter: &PropertyFilter, limit: u32) -> Result<Self> {
        filter.validate()?;

        let mut search = Self {
            builder: QueryBuilder::new(format!(
                "SELECT {}, avg(property_reviews.rating)::float8 AS average_rating\n\
                 FROM properties\n\
                 JOIN property_reviews ON properties.id = property_reviews.property_id",
                qualified_property_columns()
            )),
            has_predicate: false,
        };

        if let Some(city) = filter.city_term() {
            search
                .predicate()
                .push("properties.city ILIKE ")
                .push_bind(city_pattern(city));
        }
        if let Some(owner_id) = filter.owner_id {
            search
                .predicate()
                .push("properties.owner_id = ")
                .push_bind(owner_id);
        }
        if let Some(min) = filter.minimum_price_per_night {
            search
                .predicate()
                .push("properties.cost_per_night >= ")
                .push_bind(min);
        }
        if let Some(max) = filter.maximum_price_per_night {
            search
                .predicate()
                .push("properties.cost_per_night <= ")
                .push_bind(max);
        }

        search.builder.push("\nGROUP BY properties.id");
        if let Some(rating) = filter.minimum_rating {
            search
                .builder
                .push("\nHAVING avg(property_reviews.rating) >= ")
                .push_bind(rating);
        }

        search
            .builder
            .push("\nORDER BY properties.cost_per_night, properties.id\nLIMIT ")
            .push_bind(i64::from(limit));

        Ok(search)
    }

    /// Open the next predicate with `WHERE` or `AND`.
    fn predicate(&mut self) -> &mut QueryBuilder<'static, Postgres> {
        let keyword = if self.has_predicate { " AND " } else { "\nWHERE " };
        self.has_predicate = true;
        self.builder.push(keyword)
    }

    /// SQL text with `$n` placeholders.
    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    /// Typed query with every filter value bound.
    pub fn build_query_as(&mut self) -> QueryAs<'_, Postgres, PropertyView, PgArguments> {
        self.builder.build_query_as()
    }
}

/// `ILIKE` pattern matching `city` anywhere in the column.
fn city_pattern(city: &str) -> String {
    format!("%{}%", escape_like(city))
}

/// Escape LIKE wildcards so user input only ever matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
