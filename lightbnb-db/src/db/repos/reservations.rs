//! Reservation repository (read-only)

use sqlx::PgPool;
use tracing::instrument;

use crate::error::Result;
use crate::models::ReservationView;

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
    /// Uses an inner join on reviews, so reservations of properties that
    /// have never been reviewed are not returned.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_for_guest(&self, guest_id: i32, limit: u32) -> Result<Vec<ReservationView>> {
        let reservations = sqlx::query_as::<_, ReservationView>(
            r#"
            SELECT
                reservations.id,
                reservations.start_date,
                reservations.end_date,
                properties.id AS property_id,
                properties.title,
                properties.cost_per_night,
                properties.number_of_bedrooms,
                properties.number_of_bathrooms,
                properties.parking_spaces,
                properties.thumbnail_photo_url,
                avg(property_reviews.rating)::float8 AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            JOIN property_reviews ON properties.id = property_reviews.property_id
            WHERE reservations.guest_id = $1
            GROUP BY properties.id, reservations.id
            ORDER BY reservations.start_date, reservations.id
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(count = reservations.len(), "reservations fetched");
        Ok(reservations)
    }
}
