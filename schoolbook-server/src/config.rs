//! Database configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `DATABASE_URL`: full connection string; wins over the parts below
//! - `DB_HOST` (default `localhost`), `DB_PORT` (`5432`)
//! - `DB_USER` (`postgres`), `DB_PASSWORD` (empty), `DB_DATABASE` (`schooldb`)
//! - `DB_MAX_CONNECTIONS` (`10`), `DB_ACQUIRE_TIMEOUT_SECS` (`30`)

use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Default pool ceiling shared by all requests.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the schools database
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Create config from environment variables, falling back to local
    /// development defaults. Unparseable numbers fall back too.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| get(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            url: get("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            host: get("DB_HOST").unwrap_or(defaults.host),
            port: parsed("DB_PORT")
                .and_then(|p| u16::try_from(p).ok())
                .unwrap_or(defaults.port),
            user: get("DB_USER").unwrap_or(defaults.user),
            password: get("DB_PASSWORD").unwrap_or(defaults.password),
            database: get("DB_DATABASE").unwrap_or(defaults.database),
            max_connections: parsed("DB_MAX_CONNECTIONS")
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_connections),
            acquire_timeout: parsed("DB_ACQUIRE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.acquire_timeout),
        }
    }

    /// Connection options for sqlx.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.url {
            Some(url) => url.parse(),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.database)),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "schooldb".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
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
    fn defaults_when_env_empty() {
        let config = DatabaseConfig::from_lookup(lookup(&[]));
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.database, "schooldb");
        assert_eq!(config.max_connections, 10);
        assert!(config.url.is_none());
    }

    #[test]
    fn reads_parts_from_env() {
        let config = DatabaseConfig::from_lookup(lookup(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "schools"),
            ("DB_PASSWORD", "secret"),
            ("DB_DATABASE", "registry"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "2"),
        ]));
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.user, "schools");
        assert_eq!(config.password, "secret");
        assert_eq!(config.database, "registry");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.acquire_timeout, Duration::from_secs(2));

        let opts = config.connect_options().unwrap();
        assert_eq!(opts.get_host(), "db.internal");
        assert_eq!(opts.get_port(), 6543);
        assert_eq!(opts.get_database(), Some("registry"));
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = DatabaseConfig::from_lookup(lookup(&[
            ("DB_PORT", "not-a-port"),
            ("DB_MAX_CONNECTIONS", "0"),
        ]));
        assert_eq!(config.port, 5432);
        assert_eq!(config.max_connections, 10);
    }

    #[test]
    fn database_url_wins() {
        let config = DatabaseConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://u:p@example.org:7000/other"),
            ("DB_HOST", "ignored"),
        ]));
        let opts = config.connect_options().unwrap();
        assert_eq!(opts.get_host(), "example.org");
        assert_eq!(opts.get_port(), 7000);
        assert_eq!(opts.get_database(), Some("other"));
    }
}
