use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::mem;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::config::LifecycleConfig;
use crate::feature::{Action, ActionObservingReducer, FeatureState, Reducer, Store};
use crate::relay::{ActionRelay, ObserverToken};
use crate::task::{CancelToken, ManagedTask, TaskId};

use super::delegate::DelegateActionExtractable;
use super::error::LifecycleError;
use super::interactable::{Interactable, LifecycleAction, LifecycleActionConvertible};

/// Bridges router lifecycle calls into a store and owns lifecycle-scoped work.
///
/// `activate()` sends `DidBecomeActive`, `deactivate()` sends
/// `WillResignActive` and then cancels every managed task. Both forward their
/// event on every call, even when redundant.
///
/// Action observation is available only when the interactor was given the
/// relay its store's reducer feeds. Without one, every `observe_*` call
/// returns `None`.
pub struct LifecycleInteractor<S, A> {
    store: Store<S, A>,
    relay: Option<ActionRelay<A>>,
    managed: Mutex<HashMap<TaskId, ManagedTask>>,
}

impl<S: FeatureState, A: Action> LifecycleInteractor<S, A> {
    /// Interactor without action observation.
    pub fn new(store: Store<S, A>) -> Self {
        Self {
            store,
            relay: None,
            managed: Mutex::new(HashMap::new()),
        }
    }

    /// Interactor observing `relay`, which must be fed by the store's reducer
    /// (see [`ActionObservingReducer::relaying`]).
    pub fn with_relay(store: Store<S, A>, relay: ActionRelay<A>) -> Self {
        Self {
            store,
            relay: Some(relay),
            managed: Mutex::new(HashMap::new()),
        }
    }

    /// Build the store, the observing reducer and the relay in one step.
    pub fn from_reducer<R>(initial_state: S, reducer: R) -> Self
    where
        R: Reducer<State = S, Action = A>,
    {
        let relay = ActionRelay::new();
        let store = Store::new(
            initial_state,
            ActionObservingReducer::relaying(reducer, relay.clone()),
        );
        Self::with_relay(store, relay)
    }

    pub fn store(&self) -> &Store<S, A> {
        &self.store
    }

    pub fn has_relay(&self) -> bool {
        self.relay.is_some()
    }

    /// Observe every action the store processes.
    pub fn observe_actions<F>(&self, observer: F) -> Option<ObserverToken>
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        self.relay.as_ref().map(|relay| relay.observe(observer))
    }

    /// Observe one case of the action type.
    ///
    /// `handler` receives only the payloads `extract` returns; see
    /// [`extract_case!`](crate::extract_case).
    pub fn observe_action<T, E, F>(&self, extract: E, handler: F) -> Option<ObserverToken>
    where
        E: Fn(&A) -> Option<T> + Send + Sync + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        self.observe_actions(move |action| {
            if let Some(payload) = extract(action) {
                handler(payload);
            }
        })
    }

    /// Observe delegate events of an action type that exposes them.
    pub fn observe_delegate_events<F>(&self, handler: F) -> Option<ObserverToken>
    where
        A: DelegateActionExtractable,
        F: Fn(A::Delegate) + Send + Sync + 'static,
    {
        self.observe_action(|action: &A| action.delegate_event(), handler)
    }

    pub fn remove_action_observer(&self, token: ObserverToken) {
        if let Some(relay) = &self.relay {
            relay.remove_observer(token);
        }
    }

    /// Register a running task for cancellation at the next `deactivate()`.
    ///
    /// Entries already cancelled or finished are dropped first.
    pub fn manage(&self, task: ManagedTask) -> ManagedTask {
        let mut managed = self.managed.lock();
        managed.retain(|_, task| !task.is_cancelled() && !task.is_finished());
        managed.insert(task.id(), task.clone());
        task
    }

    /// Spawn `work` on the current tokio runtime and manage it.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn spawn_managed<F, Fut>(&self, work: F) -> ManagedTask
    where
        F: FnOnce(CancelToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.manage(ManagedTask::spawn(work))
    }

    /// Cancel and forget every managed task. Safe with none registered.
    pub fn cancel_managed_tasks(&self) {
        let tasks = mem::take(&mut *self.managed.lock());
        if tasks.is_empty() {
            return;
        }
        tracing::debug!(count = tasks.len(), "cancelling managed tasks");
        for task in tasks.values() {
            task.cancel();
        }
    }

    pub fn managed_task_count(&self) -> usize {
        self.managed.lock().len()
    }
}

impl<S, A> LifecycleInteractor<S, A>
where
    S: FeatureState,
    A: Action + LifecycleActionConvertible,
{
    /// Deactivate, then wait until every task managed at this moment has
    /// returned.
    ///
    /// `deactivate()` itself never blocks; this is the bounded variant for
    /// callers that need to know cancellation was observed.
    pub async fn deactivate_and_drain(
        &self,
        config: &LifecycleConfig,
    ) -> Result<(), LifecycleError> {
        let tasks: Vec<ManagedTask> = self.managed.lock().values().cloned().collect();
        self.deactivate();

        let deadline = Instant::now() + config.drain_timeout();
        loop {
            let remaining = tasks.iter().filter(|task| !task.is_finished()).count();
            if remaining == 0 {
                return Ok(());
            }
            if Instant::now() >= deadline {
                tracing::warn!(
                    remaining,
                    timeout_ms = config.drain_timeout_ms,
                    "managed tasks did not drain"
                );
                return Err(LifecycleError::DrainTimeout {
                    remaining,
                    timeout_ms: config.drain_timeout_ms,
                });
            }
            tokio::time::sleep(config.drain_poll_interval()).await;
        }
    }
}

impl<S, A> Interactable for LifecycleInteractor<S, A>
where
    S: FeatureState,
    A: Action + LifecycleActionConvertible,
{
    fn activate(&self) {
        tracing::trace!("interactor did become active");
        self.store.send(A::from_lifecycle(LifecycleAction::DidBecomeActive));
    }

    fn deactivate(&self) {
        tracing::trace!("interactor will resign active");
        self.store.send(A::from_lifecycle(LifecycleAction::WillResignActive));
        self.cancel_managed_tasks();
    }
}

impl<S: fmt::Debug, A> fmt::Debug for LifecycleInteractor<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleInteractor")
            .field("store", &self.store)
            .field("relay", &self.relay.is_some())
            .field("managed", &self.managed.lock().len())
            .finish()
    }
}
