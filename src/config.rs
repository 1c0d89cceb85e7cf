//! Process configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `REVIEWER_DB_PATH` | `reviewer-service.db` |
//! | `REVIEWER_HOST` | `0.0.0.0` |
//! | `REVIEWER_PORT` | `8080` |
//! | `REVIEWER_REQUEST_TIMEOUT_SECS` | `10` |
//! | `REVIEWER_DB_MAX_CONNECTIONS` | `5` |
//! | `REVIEWER_DB_BUSY_TIMEOUT_SECS` | `30` |

use crate::db::PoolSettings;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub db_path: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub request_timeout: Duration,
    pub db_max_connections: u32,
    pub db_busy_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("reviewer-service.db"),
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            request_timeout: Duration::from_secs(10),
            db_max_connections: 5,
            db_busy_timeout: Duration::from_secs(30),
        }
    }
}

impl ServiceConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or empty keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_path = get("REVIEWER_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);
        let host = parse_or(get("REVIEWER_HOST"), "REVIEWER_HOST", defaults.host)?;
        let port = parse_or(get("REVIEWER_PORT"), "REVIEWER_PORT", defaults.port)?;
        let request_timeout = parse_or(
            get("REVIEWER_REQUEST_TIMEOUT_SECS"),
            "REVIEWER_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        )?;
        let db_max_connections = parse_or(
            get("REVIEWER_DB_MAX_CONNECTIONS"),
            "REVIEWER_DB_MAX_CONNECTIONS",
            defaults.db_max_connections,
        )?;
        let db_busy_timeout = parse_or(
            get("REVIEWER_DB_BUSY_TIMEOUT_SECS"),
            "REVIEWER_DB_BUSY_TIMEOUT_SECS",
            defaults.db_busy_timeout.as_secs(),
        )?;

        if db_max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "REVIEWER_DB_MAX_CONNECTIONS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            db_path,
            host,
            port,
            request_timeout: Duration::from_secs(request_timeout),
            db_max_connections,
            db_busy_timeout: Duration::from_secs(db_busy_timeout),
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            busy_timeout: self.db_busy_timeout,
        }
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
