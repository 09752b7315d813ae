//! Base trait for feature actions.

/// Anything a [`Store`](super::Store) can be sent.
///
/// One enum per feature usually carries view input, effect results,
/// injected [`LifecycleAction`](crate::LifecycleAction)s and the feature's
/// delegate case for its parent.
pub trait Action: Send + 'static {}
