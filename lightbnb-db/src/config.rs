//! Connection configuration
//!
//! Resolution order:
//! 1. explicit `--config` file, else `~/.lightbnb/config.toml` if it exists
//! 2. environment (`.env` is loaded first): `DATABASE_URL`, `PGHOST`,
//!    `PGPORT`, `PGUSER`, `PGPASSWORD`, `PGDATABASE`
//!
//! Environment values win over file values.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_STATEMENT_TIMEOUT_MS: u64 = 10_000;
const APPLICATION_NAME: &str = "lightbnb";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config (invalid TOML): {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid database url: {0}")]
    InvalidUrl(#[source] sqlx::Error),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    database: DbConfig,
}

/// Database connection settings.
///
/// Either `url` or the individual connection fields may be given. When both
/// are present the individual fields override the matching parts of the url.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Server-side `statement_timeout`; 0 leaves the server default in place
    pub statement_timeout_ms: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: None,
            port: None,
            user: None,
            password: None,
            database: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            statement_timeout_ms: DEFAULT_STATEMENT_TIMEOUT_MS,
        }
    }
}

// Credentials must never end up in logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("DbConfig")
            .field("url", &redact(&self.url))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &redact(&self.password))
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("statement_timeout_ms", &self.statement_timeout_ms)
            .finish()
    }
}

impl DbConfig {
    /// Load configuration from an optional file plus the environment.
    ///
    /// Without an explicit path, `~/.lightbnb/config.toml` is used when it
    /// exists; a missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Get config file path: ~/.lightbnb/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lightbnb/config.toml")
    }

    /// Read the `[database]` table of a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse the `[database]` table from TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.database)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.url = Some(url);
        }
        if let Some(host) = lookup("PGHOST") {
            self.host = Some(host);
        }
        if let Some(port) = lookup("PGPORT") {
            let port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PGPORT is not a port: '{port}'")))?;
            self.port = Some(port);
        }
        if let Some(user) = lookup("PGUSER") {
            self.user = Some(user);
        }
        if let Some(password) = lookup("PGPASSWORD") {
            self.password = Some(password);
        }
        if let Some(database) = lookup("PGDATABASE") {
            self.database = Some(database);
        }
        Ok(())
    }

    /// Validate numeric settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if self.acquire_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "acquire_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// How long a caller waits for a pooled connection.
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Build sqlx connect options from the resolved settings.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let mut options = match &self.url {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .map_err(ConfigError::InvalidUrl)?,
            None => PgConnectOptions::new(),
        };

        if let Some(host) = &self.host {
            options = options.host(host);
        }
        if let Some(port) = self.port {
            options = options.port(port);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }

        options = options.application_name(APPLICATION_NAME);
        if self.statement_timeout_ms > 0 {
            options = options.options([(
                "statement_timeout",
                format!("{}ms", self.statement_timeout_ms),
            )]);
        }

        Ok(options)
    }
}
