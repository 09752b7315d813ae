use std::fmt;

use parking_lot::Mutex;
use uuid::Uuid;

/// Identity of a hosted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(Uuid);

impl ViewId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a view left its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalEvent {
    RemovedFromParent,
    Dismissed,
}

type RemovalHandler = Box<dyn FnOnce(RemovalEvent) + Send>;

/// Rendered view handle produced for a store.
///
/// Carries a one-shot removal slot: the installed handler runs at most once,
/// on the first removal after it was installed.
pub struct HostedView {
    id: ViewId,
    title: String,
    removal: Mutex<Option<RemovalHandler>>,
}

impl HostedView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ViewId::new(),
            title: title.into(),
            removal: Mutex::new(None),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Arm the slot, replacing any handler that has not fired yet.
    pub fn set_removal_handler<F>(&self, handler: F)
    where
        F: FnOnce(RemovalEvent) + Send + 'static,
    {
        *self.removal.lock() = Some(Box::new(handler));
    }

    /// Disarm the slot. Returns whether a handler was armed.
    pub fn clear_removal_handler(&self) -> bool {
        self.removal.lock().take().is_some()
    }

    pub fn has_removal_handler(&self) -> bool {
        self.removal.lock().is_some()
    }

    /// Called by containers when the view leaves them.
    ///
    /// Returns whether a handler ran.
    pub fn notify_removed(&self, event: RemovalEvent) -> bool {
        let handler = self.removal.lock().take();
        match handler {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for HostedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostedView")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("armed", &self.has_removal_handler())
            .finish()
    }
}
