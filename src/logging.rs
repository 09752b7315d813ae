//! Structured logging setup.

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` wins over the configured filter. Returns `false` when a global
/// subscriber is already installed, which is common in tests and embedders.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339())
        .try_init()
        .is_ok()
}
