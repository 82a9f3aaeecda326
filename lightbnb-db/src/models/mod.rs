//! Row types and insert payloads
//!
//! Records map directly to query results. Insert payloads and the search
//! filter derive `Deserialize` so a web layer can pass request data through
//! unchanged.

pub mod property;
pub mod reservation;
pub mod user;

pub use property::{NewProperty, Property, PropertyFilter, PropertyView};
pub use reservation::ReservationView;
pub use user::{NewUser, User};
