//! Cooperative cancellation for lifecycle-scoped background work.
//!
//! A [`ManagedTask`] pairs a cancellation signal with a way to tell whether
//! the work has returned.
//! Owners signal; the running work is expected to notice and return on its
//! own. Nothing here aborts a future.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::sync::Notify;
use uuid::Uuid;

/// Shared cancellation signal handed to a running unit of work.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelState>,
}

#[derive(Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation.
    ///
    /// Returns `true` only for the call that actually flipped the flag, so
    /// repeated cancellation is observable as a no-op.
    pub fn cancel(&self) -> bool {
        if self.inner.cancelled.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.inner.notify.notify_waiters();
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        // Register with Notify BEFORE reading the flag: a cancel() landing
        // between the check and the await would otherwise be lost, since
        // notify_waiters() only wakes already-registered waiters.
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Opaque identity of a managed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Handle to a background unit of work whose lifetime is tied to an owner.
///
/// Cloning yields another handle to the same task. Cancellation is
/// idempotent.
#[derive(Debug, Clone)]
pub struct ManagedTask {
    id: TaskId,
    token: CancelToken,
    completion: Completion,
}

#[derive(Debug, Clone)]
enum Completion {
    /// Spawned by this module; the runtime knows when it is done.
    Spawned(Arc<JoinHandle<()>>),
    /// Driven elsewhere and reported through `mark_finished`.
    External(Arc<AtomicBool>),
}

impl ManagedTask {
    /// Handle for work that is driven elsewhere (a thread, another runtime).
    ///
    /// The driver is responsible for polling [`token`](Self::token) and
    /// calling [`mark_finished`](Self::mark_finished) when it returns.
    pub fn new() -> Self {
        Self {
            id: TaskId::new(),
            token: CancelToken::new(),
            completion: Completion::External(Arc::new(AtomicBool::new(false))),
        }
    }

    /// Spawn `work` on the current tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn spawn<F, Fut>(work: F) -> Self
    where
        F: FnOnce(CancelToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::spawn_on(&Handle::current(), work)
    }

    /// Spawn `work` on an explicit runtime handle.
    pub fn spawn_on<F, Fut>(handle: &Handle, work: F) -> Self
    where
        F: FnOnce(CancelToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancelToken::new();
        let join = handle.spawn(work(token.clone()));
        Self {
            id: TaskId::new(),
            token,
            completion: Completion::Spawned(Arc::new(join)),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Signal the task to stop. Returns `true` if this call flipped the flag.
    pub fn cancel(&self) -> bool {
        self.token.cancel()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the work has returned (or panicked).
    pub fn is_finished(&self) -> bool {
        match &self.completion {
            Completion::Spawned(join) => join.is_finished(),
            Completion::External(finished) => finished.load(Ordering::SeqCst),
        }
    }

    /// Report completion of externally driven work. Spawned tasks track
    /// completion through their join handle and ignore this.
    pub fn mark_finished(&self) {
        if let Completion::External(finished) = &self.completion {
            finished.store(true, Ordering::SeqCst);
        }
    }
}

impl Default for ManagedTask {
    fn default() -> Self {
        Self::new()
    }
}
