//! Reducer trait for feature modules.

use std::fmt;
use std::marker::PhantomData;

use super::action::Action;
use super::effect::Effect;
use super::state::FeatureState;

/// Pure step function of a feature.
///
/// Async work, timers and outbound calls are described in the returned
/// [`Effect`]; the [`Store`](super::Store) runs them.
pub trait Reducer: Send + Sync + 'static {
    type State: FeatureState;
    type Action: Action;

    /// Apply `action` to `state` in place.
    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action>;
}

/// Reducer backed by a closure.
pub struct Reduce<S, A, F> {
    body: F,
    _marker: PhantomData<fn(&mut S, A)>,
}

impl<S, A, F> Reduce<S, A, F>
where
    S: FeatureState,
    A: Action,
    F: Fn(&mut S, A) -> Effect<A> + Send + Sync + 'static,
{
    pub fn new(body: F) -> Self {
        Self {
            body,
            _marker: PhantomData,
        }
    }
}

impl<S, A, F> Reducer for Reduce<S, A, F>
where
    S: FeatureState,
    A: Action,
    F: Fn(&mut S, A) -> Effect<A> + Send + Sync + 'static,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: &mut S, action: A) -> Effect<A> {
        (self.body)(state, action)
    }
}

impl<S, A, F> fmt::Debug for Reduce<S, A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Reduce")
    }
}
