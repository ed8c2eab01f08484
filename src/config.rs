//! Core configuration loaded from environment variables.
//!
//! Loaded once by the embedding binary before any service is constructed.
//!
//! ## Required Variables
//!
//! - `REDIS_URL` - connection string for the store and the pub/sub channel
//!
//! ## Optional Variables
//!
//! - `SHARD_COUNT` - counter shards (default: 20, range: 1-256)
//! - `PUBLISH_TIMEOUT_MS` - click publish latency ceiling (default: 1000)
//! - `KEY_PREFIX` - store key namespace (default: `publink:`)
//! - `CHANNEL_PREFIX` - pub/sub channel namespace (default: `clicks:`)
//! - `RUST_LOG` - log level (default: `info`)
//! - `LOG_FORMAT` - log format: `text` or `json` (default: `text`)

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::services::counter::DEFAULT_SHARD_COUNT;

/// Core configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    /// Number of counter shards. Reads scan the whole shard set, so this is
    /// a small bounded design constant, not a tuning knob for users.
    pub shard_count: u32,
    /// Hard ceiling on the latency a click publish may add to a redirect.
    pub publish_timeout_ms: u64,
    pub key_prefix: String,
    pub channel_prefix: String,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when `REDIS_URL` is missing.
    pub fn from_env() -> Result<Self> {
        let redis_url = env::var("REDIS_URL").context("REDIS_URL must be set")?;

        Ok(Self {
            redis_url,
            shard_count: parse_or(env::var("SHARD_COUNT").ok(), DEFAULT_SHARD_COUNT),
            publish_timeout_ms: parse_or(env::var("PUBLISH_TIMEOUT_MS").ok(), 1000),
            key_prefix: env::var("KEY_PREFIX").unwrap_or_else(|_| "publink:".to_string()),
            channel_prefix: env::var("CHANNEL_PREFIX").unwrap_or_else(|_| "clicks:".to_string()),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `shard_count` is 0 or above 256
    /// - `publish_timeout_ms` is 0
    /// - `log_format` is not `text` or `json`
    /// - `redis_url` has an unexpected scheme
    pub fn validate(&self) -> Result<()> {
        if self.shard_count == 0 || self.shard_count > 256 {
            anyhow::bail!(
                "SHARD_COUNT must be between 1 and 256, got {}",
                self.shard_count
            );
        }

        if self.publish_timeout_ms == 0 {
            anyhow::bail!("PUBLISH_TIMEOUT_MS must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.redis_url.starts_with("redis://") && !self.redis_url.starts_with("rediss://") {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(&self.redis_url)
            );
        }

        Ok(())
    }

    /// Publish timeout as a [`Duration`].
    pub fn publish_timeout(&self) -> Duration {
        Duration::from_millis(self.publish_timeout_ms)
    }

    /// Logs a configuration summary (without credentials).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Redis: {}", mask_connection_string(&self.redis_url));
        tracing::info!("  Counter shards: {}", self.shard_count);
        tracing::info!("  Publish timeout: {}ms", self.publish_timeout_ms);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

/// Parses an optional variable, falling back to `default` when the variable
/// is absent or unparsable.
fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Masks the password in connection strings for logging.
///
/// `redis://:password@host:port/db` becomes `redis://:***@host:port/db`.
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            redis_url: "redis://localhost:6379/0".to_string(),
            shard_count: 20,
            publish_timeout_ms: 1000,
            key_prefix: "publink:".to_string(),
            channel_prefix: "clicks:".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[test]
    fn test_parse_or_uses_value() {
        assert_eq!(parse_or(Some("7".to_string()), 20u32), 7);
    }

    #[test]
    fn test_parse_or_defaults_on_missing_or_garbage() {
        assert_eq!(parse_or(None, 20u32), 20);
        assert_eq!(parse_or(Some("many".to_string()), 1000u64), 1000);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_shard_count() {
        let mut config = base_config();
        config.shard_count = 0;
        assert!(config.validate().is_err());
        config.shard_count = 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = base_config();
        config.publish_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_log_format() {
        let mut config = base_config();
        config.log_format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_redis_scheme() {
        let mut config = base_config();
        config.redis_url = "postgres://localhost/db".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mask_connection_string() {
        assert_eq!(
            mask_connection_string("redis://:password@localhost:6379/0"),
            "redis://:***@localhost:6379/0"
        );
        assert_eq!(
            mask_connection_string("redis://localhost:6379/0"),
            "redis://localhost:6379/0"
        );
    }
}
