//! Effect descriptions returned by reducers.

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Weak;

use crate::task::CancelToken;

pub type EffectFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
pub type EffectWork<A> = Box<dyn FnOnce(EffectSender<A>) -> EffectFuture + Send + 'static>;

/// Identifier for a cancellable effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EffectId(Cow<'static, str>);

impl From<&'static str> for EffectId {
    fn from(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }
}

impl From<String> for EffectId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Follow-up work described by a reducer.
pub enum Effect<A> {
    /// Nothing to do.
    None,
    /// Feed another action into the same store, after the current one.
    Send(A),
    /// Several effects, applied in order.
    Merge(Vec<Effect<A>>),
    /// Async work spawned on the ambient tokio runtime.
    Run {
        id: Option<EffectId>,
        work: EffectWork<A>,
    },
    /// Cancel the in-flight effect registered under this id.
    Cancel(EffectId),
}

impl<A> Effect<A> {
    pub fn none() -> Self {
        Effect::None
    }

    pub fn send(action: A) -> Self {
        Effect::Send(action)
    }

    pub fn merge(effects: impl IntoIterator<Item = Effect<A>>) -> Self {
        Effect::Merge(effects.into_iter().collect())
    }

    /// Async work. The closure receives a sender that feeds actions back into
    /// the store and exposes cooperative cancellation.
    pub fn run<F, Fut>(work: F) -> Self
    where
        A: Send + 'static,
        F: FnOnce(EffectSender<A>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Effect::Run {
            id: None,
            work: Box::new(move |sender: EffectSender<A>| -> EffectFuture {
                Box::pin(work(sender))
            }),
        }
    }

    /// Register `run` work under `id`. Starting it cancels any in-flight
    /// effect with the same id.
    pub fn cancellable(self, id: impl Into<EffectId>) -> Self {
        let id = id.into();
        match self {
            Effect::Run { work, .. } => Effect::Run { id: Some(id), work },
            Effect::Merge(effects) => Effect::Merge(
                effects
                    .into_iter()
                    .map(|effect| effect.cancellable(id.clone()))
                    .collect(),
            ),
            other => other,
        }
    }

    pub fn cancel(id: impl Into<EffectId>) -> Self {
        Effect::Cancel(id.into())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }
}

impl<A: fmt::Debug> fmt::Debug for Effect<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => f.write_str("None"),
            Effect::Send(action) => f.debug_tuple("Send").field(action).finish(),
            Effect::Merge(effects) => f.debug_tuple("Merge").field(effects).finish(),
            Effect::Run { id, .. } => f.debug_struct("Run").field("id", id).finish(),
            Effect::Cancel(id) => f.debug_tuple("Cancel").field(id).finish(),
        }
    }
}

/// Sink through which a store accepts actions from running effects.
pub(crate) trait Dispatch<A>: Send + Sync {
    fn dispatch(&self, action: A);
}

/// Handle given to `run` effects.
pub struct EffectSender<A> {
    dispatcher: Weak<dyn Dispatch<A>>,
    token: CancelToken,
}

impl<A> EffectSender<A> {
    pub(crate) fn new(dispatcher: Weak<dyn Dispatch<A>>, token: CancelToken) -> Self {
        Self { dispatcher, token }
    }

    /// Feed an action into the store.
    ///
    /// Returns `false` when the effect was cancelled or the store is gone;
    /// the action is dropped in both cases.
    pub fn send(&self, action: A) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        match self.dispatcher.upgrade() {
            Some(dispatcher) => {
                dispatcher.dispatch(action);
                true
            }
            None => false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the effect has been cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

impl<A> Clone for EffectSender<A> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Weak::clone(&self.dispatcher),
            token: self.token.clone(),
        }
    }
}
