//! Lifecycle contract and the interactor bridging it into a store.
//!
//! ```text
//! parent router ── activate() ──▶ LifecycleInteractor ── DidBecomeActive ──▶ Store
//!               ── deactivate() ▶                     ── WillResignActive ─▶
//!                                                     └─ cancel managed tasks
//! ```

mod delegate;
mod error;
mod interactable;
mod interactor;

pub use delegate::DelegateActionExtractable;
pub use error::LifecycleError;
pub use interactable::{Interactable, LifecycleAction, LifecycleActionConvertible};
pub use interactor::LifecycleInteractor;
