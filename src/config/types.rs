use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

/// Defaults for [`crate::logging::init_tracing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Include the event target in each line (default: true).
    #[serde(default = "default_with_target")]
    pub with_target: bool,
}

/// Bounds for draining managed tasks after deactivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Upper bound on waiting for managed tasks to finish (default: 2000).
    #[serde(default = "default_drain_timeout_ms")]
    pub drain_timeout_ms: u64,
    /// Polling interval while draining (default: 20).
    #[serde(default = "default_drain_poll_interval_ms")]
    pub drain_poll_interval_ms: u64,
}

impl LifecycleConfig {
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }

    pub fn drain_poll_interval(&self) -> Duration {
        Duration::from_millis(self.drain_poll_interval_ms)
    }
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_with_target() -> bool {
    true
}

fn default_drain_timeout_ms() -> u64 {
    2000
}

fn default_drain_poll_interval_ms() -> u64 {
    20
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            with_target: default_with_target(),
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            drain_timeout_ms: default_drain_timeout_ms(),
            drain_poll_interval_ms: default_drain_poll_interval_ms(),
        }
    }
}
