//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                          | Default                 |
//! |-----------------------------------|-------------------------|
//! | `SHELF_PORT`                      | `8080`                  |
//! | `SHELF_DATABASE_PATH`             | `./shelf.db`            |
//! | `SHELF_DB_MAX_CONNECTIONS`        | `5`                     |
//! | `SHELF_CORS_ORIGIN`               | `http://localhost:3000` |
//! | `SHELF_COMBINATION_CATALOG_LIMIT` | unset (unbounded)       |

use axum::http::HeaderValue;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Allowed CORS origin; `None` allows any origin (`*`)
    pub cors_origin: Option<HeaderValue>,

    /// Largest catalog the combination search will run on; `None` is unbounded
    pub combination_catalog_limit: Option<usize>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            port: 8080,
            database_path: PathBuf::from("./shelf.db"),
            db_max_connections: 5,
            cors_origin: Some(HeaderValue::from_static("http://localhost:3000")),
            combination_catalog_limit: None,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            port: parse_or(&lookup, "SHELF_PORT", defaults.port)?,

            database_path: lookup("SHELF_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            db_max_connections: parse_or(
                &lookup,
                "SHELF_DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,

            cors_origin: match lookup("SHELF_CORS_ORIGIN") {
                Some(origin) if origin.trim() == "*" => None,
                Some(origin) => Some(
                    HeaderValue::from_str(origin.trim())
                        .map_err(|_| ConfigError::InvalidValue("SHELF_CORS_ORIGIN".to_string()))?,
                ),
                None => defaults.cors_origin,
            },

            combination_catalog_limit: lookup("SHELF_COMBINATION_CATALOG_LIMIT")
                .map(|raw| {
                    raw.trim().parse().map_err(|_| {
                        ConfigError::InvalidValue("SHELF_COMBINATION_CATALOG_LIMIT".to_string())
                    })
                })
                .transpose()?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "SHELF_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
