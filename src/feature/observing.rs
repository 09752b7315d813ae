//! Reducer decorator that reports every processed action.

use crate::relay::ActionRelay;

use super::effect::Effect;
use super::reducer::Reducer;

type ActionObserver<A> = Box<dyn Fn(&A) + Send + Sync>;

/// Wraps a reducer and hands every action to an observer before reducing it.
///
/// Output is exactly the base reducer's. The observer runs once per
/// processed action, including actions the base feeds back to itself through
/// [`Effect::Send`], so delegate observers see internally produced events too.
pub struct ActionObservingReducer<R: Reducer> {
    base: R,
    observer: ActionObserver<R::Action>,
}

impl<R: Reducer> ActionObservingReducer<R> {
    pub fn new<F>(base: R, observer: F) -> Self
    where
        F: Fn(&R::Action) + Send + Sync + 'static,
    {
        Self {
            base,
            observer: Box::new(observer),
        }
    }

    /// Forward every processed action into `relay`.
    pub fn relaying(base: R, relay: ActionRelay<R::Action>) -> Self {
        Self::new(base, move |action| relay.emit(action))
    }
}

impl<R: Reducer> Reducer for ActionObservingReducer<R> {
    type State = R::State;
    type Action = R::Action;

    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action> {
        (self.observer)(&action);
        self.base.reduce(state, action)
    }
}
