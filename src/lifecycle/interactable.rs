/// Two-state lifecycle driven by a parent router.
///
/// Both calls may be made any number of times, in any order. Neither blocks.
pub trait Interactable: Send + Sync {
    fn activate(&self);
    fn deactivate(&self);
}

/// Lifecycle events forwarded into a feature's store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleAction {
    DidBecomeActive,
    WillResignActive,
}

/// Maps lifecycle events into a feature's action type.
///
/// Reducers receive these actions; they never emit them.
pub trait LifecycleActionConvertible {
    fn from_lifecycle(action: LifecycleAction) -> Self;
}
