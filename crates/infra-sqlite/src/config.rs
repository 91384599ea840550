// SQLite Adapter Configuration

use queryspec_core::error::{AppError, Result};
use std::time::Duration;

const ENV_DATABASE_URL: &str = "QUERYSPEC_DATABASE_URL";
const ENV_MAX_CONNECTIONS: &str = "QUERYSPEC_MAX_CONNECTIONS";
const ENV_BUSY_TIMEOUT_SECS: &str = "QUERYSPEC_BUSY_TIMEOUT_SECS";

/// Connection pool settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl SqliteConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }

    /// Load from `QUERYSPEC_*` environment variables, falling back to defaults
    ///
    /// # Environment Variables
    ///
    /// - `QUERYSPEC_DATABASE_URL`: e.g. `sqlite://data/app.db` (default: in-memory)
    /// - `QUERYSPEC_MAX_CONNECTIONS`: pool size (default: 5)
    /// - `QUERYSPEC_BUSY_TIMEOUT_SECS`: SQLITE_BUSY wait (default: 5)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let database_url = lookup(ENV_DATABASE_URL).unwrap_or(defaults.database_url);

        let max_connections = match lookup(ENV_MAX_CONNECTIONS) {
            Some(raw) => parse_number(ENV_MAX_CONNECTIONS, &raw)?,
            None => defaults.max_connections,
        };
        if max_connections == 0 {
            return Err(AppError::Config(format!(
                "{} must be at least 1",
                ENV_MAX_CONNECTIONS
            )));
        }

        let busy_timeout = match lookup(ENV_BUSY_TIMEOUT_SECS) {
            Some(raw) => Duration::from_secs(parse_number(ENV_BUSY_TIMEOUT_SECS, &raw)?),
            None => defaults.busy_timeout,
        };

        Ok(Self {
            database_url,
            max_connections,
            busy_timeout,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} is not a valid number: '{}'", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = SqliteConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SqliteConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = SqliteConfig::from_lookup(lookup(&[
            (ENV_DATABASE_URL, "sqlite://articles.db"),
            (ENV_MAX_CONNECTIONS, "2"),
            (ENV_BUSY_TIMEOUT_SECS, "30"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite://articles.db");
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.busy_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_malformed_numbers_rejected() {
        let result = SqliteConfig::from_lookup(lookup(&[(ENV_MAX_CONNECTIONS, "lots")]));
        assert!(matches!(result, Err(AppError::Config(_))));

        let result = SqliteConfig::from_lookup(lookup(&[(ENV_MAX_CONNECTIONS, "0")]));
        assert!(result.is_err());
    }
}
