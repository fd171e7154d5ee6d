use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for Atrium
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Content loader configuration
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            loader: LoaderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".atrium/atrium.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Seconds a cached record stays fresh
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of cached records
    #[serde(default = "default_cache_max_capacity")]
    pub max_capacity: u64,
}

const fn default_cache_ttl_secs() -> u64 {
    60
}

const fn default_cache_max_capacity() -> u64 {
    1024
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            max_capacity: default_cache_max_capacity(),
        }
    }
}

/// Content loader configuration.
///
/// The defaults encode the production timings: a 3s allowance for the cached
/// read, 5s per direct read with up to 2 attempts, and a 500ms linear backoff
/// step between direct attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoaderConfig {
    /// Milliseconds allowed for the cached read before falling through
    #[serde(default = "default_cached_read_timeout_ms")]
    pub cached_read_timeout_ms: u64,

    /// Milliseconds allowed per direct read attempt
    #[serde(default = "default_direct_read_timeout_ms")]
    pub direct_read_timeout_ms: u64,

    /// Direct read attempts before the final unguarded read
    #[serde(default = "default_direct_read_attempts")]
    pub direct_read_attempts: u32,

    /// Backoff step in milliseconds; attempt N waits N * step before retrying
    #[serde(default = "default_backoff_step_ms")]
    pub backoff_step_ms: u64,
}

const fn default_cached_read_timeout_ms() -> u64 {
    3_000
}

const fn default_direct_read_timeout_ms() -> u64 {
    5_000
}

const fn default_direct_read_attempts() -> u32 {
    2
}

const fn default_backoff_step_ms() -> u64 {
    500
}

impl LoaderConfig {
    pub fn cached_read_timeout(&self) -> Duration {
        Duration::from_millis(self.cached_read_timeout_ms)
    }

    pub fn direct_read_timeout(&self) -> Duration {
        Duration::from_millis(self.direct_read_timeout_ms)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            cached_read_timeout_ms: default_cached_read_timeout_ms(),
            direct_read_timeout_ms: default_direct_read_timeout_ms(),
            direct_read_attempts: default_direct_read_attempts(),
            backoff_step_ms: default_backoff_step_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let config = LoaderConfig::default();
        assert_eq!(config.cached_read_timeout(), Duration::from_secs(3));
        assert_eq!(config.direct_read_timeout(), Duration::from_secs(5));
        assert_eq!(config.direct_read_attempts, 2);
        assert_eq!(config.backoff_step_ms, 500);
    }

    #[test]
    fn test_cache_ttl_conversion() {
        let config = CacheConfig {
            ttl_secs: 90,
            max_capacity: 10,
        };
        assert_eq!(config.ttl(), Duration::from_secs(90));
    }
}
