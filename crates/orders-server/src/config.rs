//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `ORDERS_DB_PATH` | `orders.db` |
//! | `ORDERS_HOST` | `0.0.0.0` |
//! | `ORDERS_PORT` | `3000` |
//! | `ORDERS_POOL_SIZE` | `5` |
//! | `ORDERS_STATEMENT_TIMEOUT_MS` | `5000` |
//! | `ORDERS_SAY_URL` | the hosted keyword function |
//! | `ORDERS_SAY_TIMEOUT_MS` | `10000` |

use std::str::FromStr;
use std::time::Duration;

use orders_storage::PoolConfig;

pub const DEFAULT_SAY_URL: &str =
    "https://3mb3x8hnuc.execute-api.us-east-2.amazonaws.com/default/my-function";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub db_path: String,
    pub host: String,
    pub port: u16,
    pub pool: PoolConfig,
    pub say_url: String,
    pub say_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            db_path: "orders.db".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            pool: PoolConfig::default(),
            say_url: DEFAULT_SAY_URL.to_string(),
            say_timeout: Duration::from_secs(10),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unset keys take the default;
    /// unparsable numbers take the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ServerConfig::default();
        let statement_ms = parsed(&lookup, "ORDERS_STATEMENT_TIMEOUT_MS", 5_000u64);
        let say_ms = parsed(&lookup, "ORDERS_SAY_TIMEOUT_MS", 10_000u64);

        ServerConfig {
            db_path: lookup("ORDERS_DB_PATH").unwrap_or(defaults.db_path),
            host: lookup("ORDERS_HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "ORDERS_PORT", defaults.port),
            pool: PoolConfig {
                capacity: parsed(&lookup, "ORDERS_POOL_SIZE", defaults.pool.capacity),
                statement_timeout: Duration::from_millis(statement_ms),
                busy_timeout: defaults.pool.busy_timeout,
            },
            say_url: lookup("ORDERS_SAY_URL").unwrap_or(defaults.say_url),
            say_timeout: Duration::from_millis(say_ms),
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unparsable setting, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = from_pairs(&[]);
        assert_eq!(config.db_path, "orders.db");
        assert_eq!(config.port, 3000);
        assert_eq!(config.pool.capacity, 5);
        assert_eq!(config.pool.statement_timeout, Duration::from_secs(5));
        assert_eq!(config.say_url, DEFAULT_SAY_URL);
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn overrides_are_applied() {
        let config = from_pairs(&[
            ("ORDERS_DB_PATH", "/tmp/x.db"),
            ("ORDERS_PORT", "8080"),
            ("ORDERS_POOL_SIZE", "2"),
            ("ORDERS_STATEMENT_TIMEOUT_MS", "250"),
            ("ORDERS_SAY_URL", "http://127.0.0.1:9/say"),
        ]);
        assert_eq!(config.db_path, "/tmp/x.db");
        assert_eq!(config.port, 8080);
        assert_eq!(config.pool.capacity, 2);
        assert_eq!(config.pool.statement_timeout, Duration::from_millis(250));
        assert_eq!(config.say_url, "http://127.0.0.1:9/say");
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let config = from_pairs(&[("ORDERS_PORT", "http"), ("ORDERS_POOL_SIZE", "-1")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.pool.capacity, 5);
    }
}
