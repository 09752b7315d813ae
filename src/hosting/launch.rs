use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::container::{NavigationStack, Window};
use super::router::ViewRouting;

/// Bootstrap connecting a prepared root module to a window.
pub trait LaunchRouting {
    fn launch(&self, window: &Window);
}

/// Launch router hosting its root view in a fresh navigation stack.
///
/// `launch` loads the root router, installs the stack as the window root,
/// makes the window visible and activates the root interactor, in that order.
pub struct NavigationLaunchRouter<R: ?Sized> {
    root: Arc<R>,
    stack: Mutex<Option<Arc<NavigationStack>>>,
}

impl<R: ViewRouting + ?Sized> NavigationLaunchRouter<R> {
    pub fn new(root: Arc<R>) -> Self {
        Self {
            root,
            stack: Mutex::new(None),
        }
    }

    pub fn root(&self) -> &Arc<R> {
        &self.root
    }

    /// Stack created by the last `launch`.
    pub fn navigation_stack(&self) -> Option<Arc<NavigationStack>> {
        self.stack.lock().clone()
    }
}

impl<R: ViewRouting + ?Sized> LaunchRouting for NavigationLaunchRouter<R> {
    fn launch(&self, window: &Window) {
        self.root.load();

        let stack = Arc::new(NavigationStack::with_root(self.root.view()));
        window.set_root(Arc::clone(&stack));
        window.make_key_and_visible();
        *self.stack.lock() = Some(stack);

        tracing::debug!(root = %self.root.id(), "launched root router");
        self.root.interactor().activate();
    }
}

impl<R: ?Sized> fmt::Debug for NavigationLaunchRouter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationLaunchRouter")
            .field("launched", &self.stack.lock().is_some())
            .finish()
    }
}
