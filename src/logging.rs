//! Tracing subscriber initialization.
//!
//! Called once at startup by the embedding binary, after configuration has
//! been loaded. `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Initializes the global tracing subscriber from configuration.
///
/// Uses the `RUST_LOG` environment variable when set, otherwise falls back
/// to `config.log_level`. Emits JSON when `config.log_format` is `json`,
/// human-readable text otherwise.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
