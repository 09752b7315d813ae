use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::view::{HostedView, RemovalEvent, ViewId};

/// Push/pop container of hosted views.
pub trait NavigationContainer: Send + Sync {
    fn contains(&self, view: ViewId) -> bool;
    fn push(&self, view: Arc<HostedView>, animated: bool);
    /// Pop every view above `view`. No-op when `view` is not in the stack.
    fn pop_to(&self, view: ViewId, animated: bool);
    fn top(&self) -> Option<Arc<HostedView>>;
}

/// Modal presentation container.
pub trait PresentationContainer: Send + Sync {
    fn is_presenting(&self, view: ViewId) -> bool;
    fn present(&self, view: Arc<HostedView>, animated: bool);
    /// Dismiss `view` together with every view presented above it. No-op
    /// when `view` is not presented.
    fn dismiss(&self, view: ViewId, animated: bool);
}

/// In-memory navigation stack.
///
/// Views removed by [`pop_to`](NavigationContainer::pop_to) or
/// [`interactive_pop`](Self::interactive_pop) receive
/// [`RemovalEvent::RemovedFromParent`], topmost first, after the stack has
/// been updated.
#[derive(Default)]
pub struct NavigationStack {
    views: Mutex<Vec<Arc<HostedView>>>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: Arc<HostedView>) -> Self {
        Self {
            views: Mutex::new(vec![root]),
        }
    }

    /// Snapshot, bottom first.
    pub fn views(&self) -> Vec<Arc<HostedView>> {
        self.views.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.views.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.lock().is_empty()
    }

    pub fn count_of(&self, view: ViewId) -> usize {
        self.views.lock().iter().filter(|v| v.id() == view).count()
    }

    /// User-driven back gesture: pop the top view, never the root.
    pub fn interactive_pop(&self) -> Option<Arc<HostedView>> {
        let popped = {
            let mut views = self.views.lock();
            if views.len() < 2 {
                return None;
            }
            views.pop()
        }?;
        tracing::trace!(view = %popped.id(), "interactive pop");
        popped.notify_removed(RemovalEvent::RemovedFromParent);
        Some(popped)
    }
}

impl NavigationContainer for NavigationStack {
    fn contains(&self, view: ViewId) -> bool {
        self.views.lock().iter().any(|v| v.id() == view)
    }

    fn push(&self, view: Arc<HostedView>, animated: bool) {
        tracing::trace!(view = %view.id(), animated, "push");
        self.views.lock().push(view);
    }

    fn pop_to(&self, view: ViewId, animated: bool) {
        let removed = {
            let mut views = self.views.lock();
            let Some(index) = views.iter().position(|v| v.id() == view) else {
                tracing::trace!(view = %view, "pop target not in stack");
                return;
            };
            views.split_off(index + 1)
        };
        tracing::trace!(view = %view, popped = removed.len(), animated, "pop to");
        for popped in removed.iter().rev() {
            popped.notify_removed(RemovalEvent::RemovedFromParent);
        }
    }

    fn top(&self) -> Option<Arc<HostedView>> {
        self.views.lock().last().cloned()
    }
}

impl fmt::Debug for NavigationStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.views.lock().iter()).finish()
    }
}

/// In-memory stack of modally presented views.
///
/// Dismissal, router-driven or interactive, delivers
/// [`RemovalEvent::Dismissed`] to every dismissed view, topmost first.
#[derive(Default)]
pub struct ModalPresenter {
    presented: Mutex<Vec<Arc<HostedView>>>,
}

impl ModalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> Option<Arc<HostedView>> {
        self.presented.lock().last().cloned()
    }

    pub fn presented_count(&self) -> usize {
        self.presented.lock().len()
    }

    /// User-driven dismissal (swipe down) of the topmost view.
    pub fn interactive_dismiss(&self) -> Option<Arc<HostedView>> {
        let dismissed = self.presented.lock().pop()?;
        tracing::trace!(view = %dismissed.id(), "interactive dismiss");
        dismissed.notify_removed(RemovalEvent::Dismissed);
        Some(dismissed)
    }
}

impl PresentationContainer for ModalPresenter {
    fn is_presenting(&self, view: ViewId) -> bool {
        self.presented.lock().iter().any(|v| v.id() == view)
    }

    fn present(&self, view: Arc<HostedView>, animated: bool) {
        tracing::trace!(view = %view.id(), animated, "present");
        self.presented.lock().push(view);
    }

    fn dismiss(&self, view: ViewId, animated: bool) {
        let dismissed = {
            let mut presented = self.presented.lock();
            let Some(index) = presented.iter().position(|v| v.id() == view) else {
                tracing::trace!(view = %view, "dismiss target not presented");
                return;
            };
            presented.split_off(index)
        };
        tracing::trace!(view = %view, dismissed = dismissed.len(), animated, "dismiss");
        for removed in dismissed.iter().rev() {
            removed.notify_removed(RemovalEvent::Dismissed);
        }
    }
}

impl fmt::Debug for ModalPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.presented.lock().iter()).finish()
    }
}

/// Top-level surface the launch router installs its root stack into.
#[derive(Debug, Default)]
pub struct Window {
    root: Mutex<Option<Arc<NavigationStack>>>,
    visible: AtomicBool,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_root(&self, stack: Arc<NavigationStack>) {
        *self.root.lock() = Some(stack);
    }

    pub fn root(&self) -> Option<Arc<NavigationStack>> {
        self.root.lock().clone()
    }

    pub fn make_key_and_visible(&self) {
        self.visible.store(true, Ordering::SeqCst);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}
