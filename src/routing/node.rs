use std::fmt;
use std::mem;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use uuid::Uuid;

use super::router::Routing;

/// Identity of a router, assigned at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Uuid);

impl NodeId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Children = Mutex<Vec<Arc<dyn Routing>>>;

/// Tree storage embedded by every router.
///
/// Children are kept in insertion order with no two entries sharing a
/// [`NodeId`]. The node owns its children; dropping a detached, otherwise
/// unreferenced subtree releases it.
pub struct RouterNode {
    id: NodeId,
    children: Arc<Children>,
}

impl RouterNode {
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            children: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Snapshot of the attached children, in attach order.
    pub fn children(&self) -> Vec<Arc<dyn Routing>> {
        self.children.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.children.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.lock().is_empty()
    }

    pub fn contains(&self, child: NodeId) -> bool {
        contains(&self.children, child)
    }

    /// Append `child` unless a child with the same id is attached.
    /// Returns whether it was added.
    pub fn attach(&self, child: Arc<dyn Routing>) -> bool {
        let child_id = child.id();
        let mut children = self.children.lock();
        if children.iter().any(|existing| existing.id() == child_id) {
            tracing::trace!(parent = %self.id, child = %child_id, "child already attached");
            return false;
        }
        children.push(child);
        tracing::debug!(parent = %self.id, child = %child_id, "attached child");
        true
    }

    /// Remove every child with id `child`. Returns how many were removed.
    pub fn detach(&self, child: NodeId) -> usize {
        let removed = detach(&self.children, child);
        if removed > 0 {
            tracing::debug!(parent = %self.id, child = %child, "detached child");
        }
        removed
    }

    /// Handle that does not keep the children alive.
    pub fn downgrade(&self) -> WeakRouterNode {
        WeakRouterNode {
            id: self.id,
            children: Arc::downgrade(&self.children),
        }
    }
}

impl Default for RouterNode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterNode")
            .field("id", &self.id)
            .field("children", &self.len())
            .finish()
    }
}

/// Non-owning reference to a [`RouterNode`]'s children.
///
/// Every operation is a no-op once the node is gone.
#[derive(Clone)]
pub struct WeakRouterNode {
    id: NodeId,
    children: Weak<Children>,
}

impl WeakRouterNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn contains(&self, child: NodeId) -> bool {
        self.children
            .upgrade()
            .is_some_and(|children| contains(&children, child))
    }

    pub fn detach(&self, child: NodeId) -> usize {
        let Some(children) = self.children.upgrade() else {
            return 0;
        };
        let removed = detach(&children, child);
        if removed > 0 {
            tracing::debug!(parent = %self.id, child = %child, "detached child");
        }
        removed
    }
}

impl fmt::Debug for WeakRouterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakRouterNode")
            .field("id", &self.id)
            .field("alive", &(self.children.strong_count() > 0))
            .finish()
    }
}

fn contains(children: &Children, child: NodeId) -> bool {
    children.lock().iter().any(|existing| existing.id() == child)
}

fn detach(children: &Children, child: NodeId) -> usize {
    // Removed routers are dropped after the lock is released; their own drops
    // may touch other nodes.
    let removed: Vec<Arc<dyn Routing>> = {
        let mut children = children.lock();
        let (removed, kept) = mem::take(&mut *children)
            .into_iter()
            .partition(|existing| existing.id() == child);
        *children = kept;
        removed
    };
    removed.len()
}
