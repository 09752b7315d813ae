//! Multicast broadcaster bridging store actions to external observers.
//!
//! An [`ActionRelay`] is owned by the scope that builds a store and shared
//! with the interactor by cloning; there is no global registry.

mod stream;

pub use stream::ActionStream;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

/// Token identifying one observer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverToken(Uuid);

impl ObserverToken {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ObserverToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Observer<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Thread-safe multicast of action values.
///
/// Every [`emit`](Self::emit) invokes a point-in-time copy of the registry
/// taken under the lock:
/// - an observer registered while an emit is running does not see that action,
/// - an observer removed while an emit is running still sees it.
///
/// Delivery order across observers is unspecified.
pub struct ActionRelay<A> {
    observers: Arc<Mutex<HashMap<ObserverToken, Observer<A>>>>,
}

impl<A> ActionRelay<A> {
    pub fn new() -> Self {
        Self {
            observers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Deliver `action` to every observer registered right now.
    pub fn emit(&self, action: &A) {
        let snapshot: Vec<Observer<A>> = self.observers.lock().values().cloned().collect();
        for observer in snapshot {
            observer(action);
        }
    }

    /// Register an observer. The returned token removes it again.
    pub fn observe<F>(&self, observer: F) -> ObserverToken
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        let token = ObserverToken::new();
        self.observers.lock().insert(token, Arc::new(observer));
        token
    }

    /// Unregister an observer. Unknown or already removed tokens are ignored.
    pub fn remove_observer(&self, token: ObserverToken) {
        self.observers.lock().remove(&token);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.lock().len()
    }
}

impl<A> ActionRelay<A>
where
    A: Clone + Send + 'static,
{
    /// Pull-based view of the relay.
    ///
    /// Each stream is its own observer registration. It yields every action
    /// emitted after this call until it is closed or dropped.
    pub fn stream(&self) -> ActionStream<A> {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
        let token = self.observe(move |action: &A| {
            // Receiver gone means the stream is closing; nothing to deliver to.
            let _ = sender.send(action.clone());
        });
        ActionStream::new(self.clone(), token, receiver)
    }
}

impl<A> Clone for ActionRelay<A> {
    fn clone(&self) -> Self {
        Self {
            observers: Arc::clone(&self.observers),
        }
    }
}

impl<A> Default for ActionRelay<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for ActionRelay<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRelay")
            .field("observers", &self.observer_count())
            .finish()
    }
}
