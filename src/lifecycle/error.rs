use thiserror::Error;

/// Errors reported by lifecycle helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("{remaining} managed task(s) still running {timeout_ms}ms after deactivation")]
    DrainTimeout { remaining: usize, timeout_ms: u64 },
}
