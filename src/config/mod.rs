//! Ambient configuration: logging defaults and lifecycle drain bounds.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, LifecycleConfig, LoggingConfig};
