//! User repository
//!
//! No uniqueness pre-checks: a duplicate email is rejected by the store and
//! surfaces as `DbError::ConstraintViolation`.

use sqlx::PgPool;
use tracing::instrument;

use crate::error::Result;
use crate::models::{NewUser, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a single user by exact email.
    ///
    /// If several rows share the email the lowest id wins.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_with_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a single user by id.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_with_id(&self, id: i32) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a user and return the stored row, including its generated id.
    #[instrument(level = "debug", skip(self, user), fields(email = %user.email))]
    pub async fn add(&self, user: &NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(user_id = user.id, "user created");
        Ok(user)
    }
}
