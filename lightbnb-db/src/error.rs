//! Error types for lightbnb-db
//!
//! Lookups that find nothing return `Ok(None)`; everything in this module is
//! a real failure and is always propagated to the caller.

use std::fmt;

use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for data access operations
pub type Result<T> = std::result::Result<T, DbError>;

/// Which schema constraint rejected a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unique => "unique",
            Self::ForeignKey => "foreign key",
            Self::NotNull => "not null",
            Self::Check => "check",
        };
        f.write_str(name)
    }
}

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    /// The store rejected a write, e.g. a duplicate email
    #[error("{kind} constraint violated: {message}")]
    ConstraintViolation {
        kind: ConstraintKind,
        constraint: Option<String>,
        message: String,
    },

    /// Malformed SQL, parameter mismatch, or any other statement-level failure
    #[error("query failed{}: {message}", .code.as_deref().map(|c| format!(" [{c}]")).unwrap_or_default())]
    Query {
        code: Option<String>,
        message: String,
    },

    /// Connection, pool timeout, protocol or decode failure
    #[error("database error: {0}")]
    Sqlx(#[source] sqlx::Error),

    /// A search filter value the store cannot compare against
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DbError {
    /// True when the store refused a write because of a schema constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }

    /// Name of the violated constraint, when the store reported one.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::ConstraintViolation { constraint, .. } => constraint.as_deref(),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let db_err = match err {
            sqlx::Error::Database(db_err) => db_err,
            other => return Self::Sqlx(other),
        };

        let kind = match db_err.kind() {
            ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
            ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
            ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
            ErrorKind::CheckViolation => Some(ConstraintKind::Check),
            _ => None,
        };

        match kind {
            Some(kind) => Self::ConstraintViolation {
                kind,
                constraint: db_err.constraint().map(str::to_owned),
                message: db_err.message().to_owned(),
            },
            None => Self::Query {
                code: db_err.code().map(|c| c.into_owned()),
                message: db_err.message().to_owned(),
            },
        }
    }
}
