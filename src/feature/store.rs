//! Live container pairing a reducer with its current state.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use scopeguard::ScopeGuard;
use tokio::runtime::Handle;

use crate::relay::{ActionRelay, ObserverToken};
use crate::task::ManagedTask;

use super::action::Action;
use super::effect::{Dispatch, Effect, EffectId, EffectSender, EffectWork};
use super::reducer::Reducer;
use super::state::FeatureState;

/// Store type for a given reducer.
pub type StoreOf<R> = Store<<R as Reducer>::State, <R as Reducer>::Action>;

/// Synchronous, re-entrancy safe action dispatcher.
///
/// [`send`](Self::send) applies the action and every action its `send`
/// effects produce, in FIFO order, before returning. A `send` issued while a
/// dispatch is already draining (from an observer, an effect, or another
/// thread) is queued and drained by that dispatch instead.
pub struct Store<S, A> {
    core: Arc<StoreCore<S, A>>,
}

struct StoreCore<S, A> {
    reducer: Box<dyn Reducer<State = S, Action = A>>,
    state: Mutex<S>,
    queue: Mutex<DispatchQueue<A>>,
    state_relay: ActionRelay<S>,
    in_flight: Mutex<HashMap<EffectId, ManagedTask>>,
    this: Weak<StoreCore<S, A>>,
}

struct DispatchQueue<A> {
    pending: VecDeque<A>,
    draining: bool,
}

impl<S: FeatureState, A: Action> Store<S, A> {
    pub fn new<R>(initial_state: S, reducer: R) -> Self
    where
        R: Reducer<State = S, Action = A>,
    {
        let core = Arc::new_cyclic(|this| StoreCore {
            reducer: Box::new(reducer),
            state: Mutex::new(initial_state),
            queue: Mutex::new(DispatchQueue {
                pending: VecDeque::new(),
                draining: false,
            }),
            state_relay: ActionRelay::new(),
            in_flight: Mutex::new(HashMap::new()),
            this: Weak::clone(this),
        });
        Self { core }
    }

    pub fn send(&self, action: A) {
        self.core.dispatch(action);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> S {
        self.core.state.lock().clone()
    }

    pub fn with_state<T>(&self, read: impl FnOnce(&S) -> T) -> T {
        read(&self.core.state.lock())
    }

    /// Observe state after every action that changed it.
    pub fn observe_state<F>(&self, observer: F) -> ObserverToken
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.core.state_relay.observe(observer)
    }

    pub fn remove_state_observer(&self, token: ObserverToken) {
        self.core.state_relay.remove_observer(token);
    }

    /// Number of cancellable effects still running.
    pub fn in_flight_effects(&self) -> usize {
        let mut in_flight = self.core.in_flight.lock();
        in_flight.retain(|_, task| !task.is_finished());
        in_flight.len()
    }
}

impl<S: FeatureState, A: Action> StoreCore<S, A> {
    fn drain(&self) {
        // A panicking reducer must not leave the queue marked as draining.
        let guard = scopeguard::guard(&self.queue, |queue| queue.lock().draining = false);
        loop {
            let action = {
                let mut queue = self.queue.lock();
                match queue.pending.pop_front() {
                    Some(action) => action,
                    None => {
                        queue.draining = false;
                        break;
                    }
                }
            };
            self.process(action);
        }
        ScopeGuard::into_inner(guard);
    }

    fn process(&self, action: A) {
        // Reduce a copy so observers invoked from inside the reducer can read
        // the store without deadlocking. Only the draining thread writes back.
        let mut next = self.state.lock().clone();
        let effect = self.reducer.reduce(&mut next, action);

        let changed = {
            let mut state = self.state.lock();
            let changed = *state != next;
            *state = next.clone();
            changed
        };
        if changed {
            self.state_relay.emit(&next);
        }

        self.apply(effect);
    }

    fn apply(&self, effect: Effect<A>) {
        match effect {
            Effect::None => {}
            Effect::Send(action) => self.queue.lock().pending.push_back(action),
            Effect::Merge(effects) => {
                for effect in effects {
                    self.apply(effect);
                }
            }
            Effect::Run { id, work } => self.spawn(id, work),
            Effect::Cancel(id) => {
                let task = self.in_flight.lock().remove(&id);
                if let Some(task) = task {
                    tracing::trace!(effect = %id, "cancelling effect");
                    task.cancel();
                }
            }
        }
    }

    fn spawn(&self, id: Option<EffectId>, work: EffectWork<A>) {
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!(
                effect = ?id,
                "dropping run effect: no tokio runtime on the dispatching thread"
            );
            return;
        };

        let this: Weak<dyn Dispatch<A>> = self.this.clone();
        let task = ManagedTask::spawn_on(&handle, move |token| {
            work(EffectSender::new(this, token))
        });

        if let Some(id) = id {
            let mut in_flight = self.in_flight.lock();
            in_flight.retain(|_, task| !task.is_finished());
            if let Some(previous) = in_flight.insert(id, task) {
                previous.cancel();
            }
        }
    }
}

impl<S: FeatureState, A: Action> Dispatch<A> for StoreCore<S, A> {
    fn dispatch(&self, action: A) {
        {
            let mut queue = self.queue.lock();
            queue.pending.push_back(action);
            if queue.draining {
                return;
            }
            queue.draining = true;
        }
        self.drain();
    }
}

impl<S, A> Drop for StoreCore<S, A> {
    fn drop(&mut self) {
        for (_, task) in self.in_flight.get_mut().drain() {
            task.cancel();
        }
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.core.state.lock())
            .finish()
    }
}
