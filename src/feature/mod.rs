//! Unidirectional data-flow primitives backing every module's interactor.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ observers
//!    ↑          │
//!    │        Effect (send / run / cancel)
//!    └──────────┘
//! ```
//!
//! - **State**: plain value owned by a [`Store`]
//! - **Action**: user intent, system events, lifecycle and delegate events
//! - **Reducer**: mutates state for one action and describes follow-up work
//! - **Effect**: a value describing that work; the store executes it

mod action;
mod effect;
mod observing;
mod reducer;
mod state;
mod store;

pub use action::Action;
pub use effect::{Effect, EffectFuture, EffectId, EffectSender, EffectWork};
pub use observing::ActionObservingReducer;
pub use reducer::{Reduce, Reducer};
pub use state::FeatureState;
pub use store::{Store, StoreOf};
