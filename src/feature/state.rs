//! Base trait for feature state.

/// State held by a [`Store`](super::Store).
///
/// `PartialEq` lets the store skip observers when an action left the state
/// untouched. `Clone` backs [`Store::state`](super::Store::state) snapshots.
pub trait FeatureState: Clone + PartialEq + Send + 'static {}
