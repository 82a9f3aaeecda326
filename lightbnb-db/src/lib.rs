//! lightbnb-db: PostgreSQL data access layer for LightBnB
//!
//! Reads and writes users, properties and reservations with parameterized
//! SQL and shapes the rows for a web front end. Callers construct a
//! [`PgStore`] from a pool (or from [`DbConfig`]) and use it through the
//! [`Store`] trait.
//!
//! ```no_run
//! # use lightbnb_db::{DbConfig, PgStore, PropertyFilter, Store};
//! # async fn cheapest() -> lightbnb_db::Result<()> {
//! let config = DbConfig::load(None)?;
//! let store = PgStore::connect(&config).await?;
//! let cheap = store
//!     .get_all_properties(&PropertyFilter::city("vancouver"), 5)
//!     .await?;
//! # drop(cheap);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

pub use config::{ConfigError, DbConfig};
pub use db::DEFAULT_LIMIT;
pub use error::{ConstraintKind, DbError, Result};
pub use models::{
    NewProperty, NewUser, Property, PropertyFilter, PropertyView, ReservationView, User,
};
pub use store::{PgStore, Store};
