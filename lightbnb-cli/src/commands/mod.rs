//! Subcommand implementations
//!
//! Each command runs against any `Store`, renders its result as pretty JSON,
//! and reports a missing record as `Outcome::NotFound` instead of an error.

use std::process::ExitCode;

use anyhow::{Context, Result};
use serde::Serialize;

pub mod properties;
pub mod reservations;
pub mod user;

#[cfg(test)]
pub(crate) mod fake;

/// Result of a command, ready to print
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// JSON document for stdout
    Found(String),
    /// Message for stderr; exits non-zero
    NotFound(String),
}

impl Outcome {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let rendered = serde_json::to_string_pretty(value).context("failed to render JSON")?;
        Ok(Self::Found(rendered))
    }

    /// Render `Some` as JSON, `None` as a not-found message.
    pub fn found_or<T: Serialize>(value: Option<T>, missing: impl FnOnce() -> String) -> Result<Self> {
        match value {
            Some(value) => Self::json(&value),
            None => Ok(Self::NotFound(missing())),
        }
    }

    pub fn report(self) -> ExitCode {
        match self {
            Self::Found(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Self::NotFound(message) => {
                eprintln!("{message}");
                ExitCode::from(2)
            }
        }
    }
}
