use std::sync::Arc;

use super::node::{NodeId, RouterNode};

/// Router tree capability.
///
/// Implementors embed a [`RouterNode`] and expose it through
/// [`node`](Self::node); every other method has a working default.
pub trait Routing: Send + Sync {
    fn node(&self) -> &RouterNode;

    fn id(&self) -> NodeId {
        self.node().id()
    }

    /// Attached children in attach order.
    fn children(&self) -> Vec<Arc<dyn Routing>> {
        self.node().children()
    }

    /// One-time setup hook. Not guarded against repeated calls.
    fn load(&self) {}

    /// Attach `child` unless a router with the same id is already attached.
    fn attach_child(&self, child: Arc<dyn Routing>) {
        self.node().attach(child);
    }

    /// Detach every attached router with `child`'s id. No-op when absent.
    fn detach_child(&self, child: &dyn Routing) {
        self.node().detach(child.id());
    }
}

/// Plain router with no view and no interactor.
#[derive(Debug, Default)]
pub struct BaseRouter {
    node: RouterNode,
}

impl BaseRouter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Routing for BaseRouter {
    fn node(&self) -> &RouterNode {
        &self.node
    }
}
