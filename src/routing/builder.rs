use std::fmt;
use std::sync::Arc;

use super::router::Routing;

/// Read-only capability contract a parent exposes to a child builder.
///
/// Child modules declare a trait extending this one and depend only on it,
/// never on the parent's concrete types.
pub trait Dependency: Send + Sync {}

/// Pure factory wiring a module's router, interactor and child builders.
///
/// `build` performs no I/O. `Router` may be unsized so that builders can hand
/// out `Arc<dyn SomeRouting>` and keep the concrete router private.
pub trait Buildable {
    type Dependency: ?Sized;
    type Router: Routing + ?Sized;

    fn build(&self, dependency: &Self::Dependency) -> Arc<Self::Router>;
}

/// Adapter projecting a parent's dependency into a child's contract.
///
/// Implement the child contract for `Component<dyn ParentContract>` (or a
/// concrete parent type) and pass the component to the child builder. Every
/// component is already a [`Dependency`], so downstream crates only add the
/// contract impl.
pub struct Component<D: ?Sized> {
    dependency: Arc<D>,
}

impl<D: ?Sized> Component<D> {
    pub fn new(dependency: Arc<D>) -> Self {
        Self { dependency }
    }

    pub fn dependency(&self) -> &D {
        &self.dependency
    }

    pub fn shared(&self) -> Arc<D> {
        Arc::clone(&self.dependency)
    }
}

impl<D: ?Sized + Send + Sync> Dependency for Component<D> {}

impl<D: ?Sized> Clone for Component<D> {
    fn clone(&self) -> Self {
        Self {
            dependency: Arc::clone(&self.dependency),
        }
    }
}

impl<D: ?Sized> fmt::Debug for Component<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component").finish_non_exhaustive()
    }
}
