//! Database layer - connection pool, repositories, and search SQL
//!
//! # Design Principles
//!
//! - The pool is constructed explicitly and passed in; there is no global
//! - Every statement is parameterized; values never enter SQL text
//! - Dynamic search pushes each clause with its bind through `QueryBuilder`
//! - Every store failure is returned to the caller

pub mod pool;
pub mod repos;
pub mod search;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use search::PropertySearch;

/// Default row cap for list operations.
pub const DEFAULT_LIMIT: u32 = 10;
