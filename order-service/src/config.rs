//! Order service configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | DB_HOST | postgres | PostgreSQL host |
//! | DB_PORT | 5432 | PostgreSQL port |
//! | DB_USER | labuser | PostgreSQL user |
//! | DB_PASSWORD | labpass | PostgreSQL password |
//! | DB_NAME | labdb | PostgreSQL database |
//! | DB_MAX_CONNECTIONS | 25 | Pool max open connections |
//! | DB_MIN_CONNECTIONS | 5 | Pool idle connections kept warm |
//! | DB_MAX_LIFETIME_SECS | 300 | Connection max lifetime |
//! | REDIS_HOST | redis | Redis host |
//! | REDIS_PORT | 6379 | Redis port |
//! | PORT | 8080 | HTTP listen port |
//! | STORE_TIMEOUT_MS | 5000 | Bound on each record store call |
//! | CACHE_TIMEOUT_MS | 1000 | Bound on each cache call |
//! | REQUEST_TIMEOUT_MS | 15000 | Bound on a whole inbound request |
//! | SHUTDOWN_TIMEOUT_MS | 10000 | Drain window for in-flight requests on stop |

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::str::FromStr;
use std::time::Duration;

/// Order service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_max_lifetime: Duration,
    pub redis_host: String,
    pub redis_port: u16,
    /// HTTP listen port
    pub http_port: u16,
    pub store_timeout: Duration,
    pub cache_timeout: Duration,
    pub request_timeout: Duration,
    pub shutdown_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset; unparsable numbers fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let text = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());
        let millis = |name: &str, default: u64| Duration::from_millis(parse_or(get(name), default));

        Self {
            db_host: text("DB_HOST", "postgres"),
            db_port: parse_or(get("DB_PORT"), 5432),
            db_user: text("DB_USER", "labuser"),
            db_password: text("DB_PASSWORD", "labpass"),
            db_name: text("DB_NAME", "labdb"),
            db_max_connections: parse_or(get("DB_MAX_CONNECTIONS"), 25),
            db_min_connections: parse_or(get("DB_MIN_CONNECTIONS"), 5),
            db_max_lifetime: Duration::from_secs(parse_or(get("DB_MAX_LIFETIME_SECS"), 300)),
            redis_host: text("REDIS_HOST", "redis"),
            redis_port: parse_or(get("REDIS_PORT"), 6379),
            http_port: parse_or(get("PORT"), 8080),
            store_timeout: millis("STORE_TIMEOUT_MS", 5_000),
            cache_timeout: millis("CACHE_TIMEOUT_MS", 1_000),
            request_timeout: millis("REQUEST_TIMEOUT_MS", 15_000),
            shutdown_timeout: millis("SHUTDOWN_TIMEOUT_MS", 10_000),
        }
    }

    /// PostgreSQL connection options (TLS disabled)
    pub fn pg_connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
            .ssl_mode(PgSslMode::Disable)
    }

    /// Redis connection URL
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }

    /// HTTP listen address
    pub fn http_addr(&self) -> String {
        format!("0.0.0.0:{}", self.http_port)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.db_host, "postgres");
        assert_eq!(config.db_port, 5432);
        assert_eq!(config.db_user, "labuser");
        assert_eq!(config.db_password, "labpass");
        assert_eq!(config.db_name, "labdb");
        assert_eq!(config.db_max_connections, 25);
        assert_eq!(config.db_min_connections, 5);
        assert_eq!(config.db_max_lifetime, Duration::from_secs(300));
        assert_eq!(config.redis_url(), "redis://redis:6379/");
        assert_eq!(config.http_addr(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.shutdown_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("REDIS_HOST", "cache.internal"),
            ("REDIS_PORT", "6380"),
            ("PORT", "9000"),
            ("CACHE_TIMEOUT_MS", "250"),
        ]);
        assert_eq!(config.db_host, "db.internal");
        assert_eq!(config.db_port, 6543);
        assert_eq!(config.redis_url(), "redis://cache.internal:6380/");
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.cache_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_empty_and_invalid_values_fall_back() {
        let config = config_with(&[("DB_HOST", ""), ("PORT", "not-a-port")]);
        assert_eq!(config.db_host, "postgres");
        assert_eq!(config.http_port, 8080);
    }
}
