//! Data access facade
//!
//! `Store` is the contract callers program against. `PgStore` is the
//! PostgreSQL implementation; tests and callers can inject any other
//! implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::DbConfig;
use crate::db::{self, PropertyRepo, ReservationRepo, UserRepo};
use crate::error::Result;
use crate::models::{
    NewProperty, NewUser, Property, PropertyFilter, PropertyView, ReservationView, User,
};

/// Every operation of the data access layer
#[async_trait]
pub trait Store: Send + Sync {
    /// `Ok(None)` when no user has this email.
    async fn get_user_with_email(&self, email: &str) -> Result<Option<User>>;

    /// `Ok(None)` when no user has this id.
    async fn get_user_with_id(&self, id: i32) -> Result<Option<User>>;

    async fn add_user(&self, user: &NewUser) -> Result<User>;

    /// At most `limit` reservations of `guest_id`, earliest start first.
    async fn get_all_reservations(&self, guest_id: i32, limit: u32)
        -> Result<Vec<ReservationView>>;

    /// At most `limit` properties matching `filter`, cheapest first.
    async fn get_all_properties(
        &self,
        filter: &PropertyFilter,
        limit: u32,
    ) -> Result<Vec<PropertyView>>;

    async fn get_property_with_id(&self, id: i32) -> Result<Option<Property>>;

    async fn add_property(&self, property: &NewProperty) -> Result<Property>;
}

/// PostgreSQL-backed store
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the pool from configuration and wrap it.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let pool = db::create_pool(config).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn users(&self) -> UserRepo<'_> {
        UserRepo::new(&self.pool)
    }

    pub fn reservations(&self) -> ReservationRepo<'_> {
        ReservationRepo::new(&self.pool)
    }

    pub fn properties(&self) -> PropertyRepo<'_> {
        PropertyRepo::new(&self.pool)
    }

    /// Wait for checked-out connections and close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Store for PgStore {
    async fn get_user_with_email(&self, email: &str) -> Result<Option<User>> {
        self.users().get_with_email(email).await
    }

    async fn get_user_with_id(&self, id: i32) -> Result<Option<User>> {
        self.users().get_with_id(id).await
    }

    async fn add_user(&self, user: &NewUser) -> Result<User> {
        self.users().add(user).await
    }

    async fn get_all_reservations(
        &self,
        guest_id: i32,
        limit: u32,
    ) -> Result<Vec<ReservationView>> {
        self.reservations().list_for_guest(guest_id, limit).await
    }

    async fn get_all_properties(
        &self,
        filter: &PropertyFilter,
        limit: u32,
    ) -> Result<Vec<PropertyView>> {
        self.properties().search(filter, limit).await
    }

    async fn get_property_with_id(&self, id: i32) -> Result<Option<Property>> {
        self.properties().get(id).await
    }

    async fn add_property(&self, property: &NewProperty) -> Result<Property> {
        self.properties().add(property).await
    }
}
