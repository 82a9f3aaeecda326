//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - Single-entity lookups return `Ok(None)` when nothing matches
//! - Inserts use `RETURNING` instead of a follow-up read
//! - Aggregates come from JOINs in the same statement (no N+1)

pub mod properties;
pub mod reservations;
pub mod users;

pub use properties::PropertyRepo;
pub use reservations::ReservationRepo;
pub use users::UserRepo;
