use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::feature::{Action, FeatureState, Store};
use crate::lifecycle::{
    DelegateActionExtractable, Interactable, LifecycleActionConvertible, LifecycleInteractor,
};
use crate::relay::ObserverToken;
use crate::routing::{NodeId, RouterNode, Routing};

use super::container::{NavigationContainer, PresentationContainer};
use super::view::{HostedView, ViewId};

/// Router that owns a view and an interactor.
///
/// This is what a [`HostingRouter`] attaches, activates and puts on screen.
pub trait ViewRouting: Routing {
    fn view(&self) -> Arc<HostedView>;
    fn interactor(&self) -> Arc<dyn Interactable>;
}

type HostedViews = Mutex<HashMap<NodeId, Weak<HostedView>>>;

/// Router composing a lifecycle interactor, a rendered view and a tree node.
///
/// The compound child operations keep tree membership, lifecycle and the
/// container in lock-step:
///
/// - attach, activate, then show the child's view unless already shown;
/// - deactivate, detach, then remove the view only if still shown.
///
/// Each hosted child's view is armed with a one-shot removal handler. When the
/// view leaves its container through a path the router did not initiate (a
/// back gesture, an interactive dismiss), the child is deactivated and
/// detached exactly once.
pub struct HostingRouter<S, A> {
    node: RouterNode,
    interactor: Arc<LifecycleInteractor<S, A>>,
    view: Arc<HostedView>,
    hosted: Arc<HostedViews>,
}

impl<S: FeatureState, A: Action> HostingRouter<S, A> {
    /// `render` builds the view for the interactor's store. The store itself
    /// is not reachable through the router afterwards.
    pub fn new<F>(interactor: Arc<LifecycleInteractor<S, A>>, render: F) -> Self
    where
        F: FnOnce(&Store<S, A>) -> HostedView,
    {
        let view = Arc::new(render(interactor.store()));
        Self {
            node: RouterNode::new(),
            interactor,
            view,
            hosted: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Observe state changes of this router's feature.
    pub fn bind_state<F>(&self, observer: F) -> ObserverToken
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.interactor.store().observe_state(observer)
    }

    pub fn unbind_state(&self, token: ObserverToken) {
        self.interactor.store().remove_state_observer(token);
    }

    /// Deliver the payload of one action case to `handler`.
    ///
    /// Returns `None` when the interactor has no relay.
    pub fn observe_action<T, E, F>(&self, extract: E, handler: F) -> Option<ObserverToken>
    where
        E: Fn(&A) -> Option<T> + Send + Sync + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        self.interactor.observe_action(extract, handler)
    }

    pub fn observe_delegate_events<F>(&self, handler: F) -> Option<ObserverToken>
    where
        A: DelegateActionExtractable,
        F: Fn(A::Delegate) + Send + Sync + 'static,
    {
        self.interactor.observe_delegate_events(handler)
    }

    /// Idempotent.
    pub fn remove_action_observer(&self, token: ObserverToken) {
        self.interactor.remove_action_observer(token);
    }

    /// Number of children whose removal handler is still armed.
    pub fn hosted_child_count(&self) -> usize {
        let mut hosted = self.hosted.lock();
        hosted.retain(|_, view| view.strong_count() > 0);
        hosted.len()
    }

    pub fn attach_activate_and_push<C, N>(&self, child: &Arc<C>, stack: &N, animated: bool)
    where
        C: ViewRouting + 'static,
        N: NavigationContainer + ?Sized,
    {
        let view = self.attach_and_activate(child);
        if stack.contains(view.id()) {
            return;
        }
        stack.push(view, animated);
    }

    pub fn attach_activate_and_present<C, P>(&self, child: &Arc<C>, presenter: &P, animated: bool)
    where
        C: ViewRouting + 'static,
        P: PresentationContainer + ?Sized,
    {
        let view = self.attach_and_activate(child);
        if presenter.is_presenting(view.id()) {
            return;
        }
        presenter.present(view, animated);
    }

    /// Deactivate and detach `child`, then pop back to `fallback` if the
    /// child's view is still in `stack`.
    pub fn deactivate_detach_and_pop<C, N>(
        &self,
        child: &Arc<C>,
        stack: &N,
        fallback: ViewId,
        animated: bool,
    ) where
        C: ViewRouting + 'static,
        N: NavigationContainer + ?Sized,
    {
        let view = self.deactivate_and_detach(child.as_ref());
        if !stack.contains(view.id()) {
            return;
        }
        stack.pop_to(fallback, animated);
    }

    pub fn deactivate_detach_and_dismiss<C, P>(&self, child: &Arc<C>, presenter: &P, animated: bool)
    where
        C: ViewRouting + 'static,
        P: PresentationContainer + ?Sized,
    {
        let view = self.deactivate_and_detach(child.as_ref());
        if !presenter.is_presenting(view.id()) {
            return;
        }
        presenter.dismiss(view.id(), animated);
    }

    fn attach_and_activate<C: ViewRouting + 'static>(&self, child: &Arc<C>) -> Arc<HostedView> {
        let routing: Arc<dyn Routing> = Arc::clone(child) as Arc<dyn Routing>;
        self.attach_child(routing);
        child.interactor().activate();
        let view = child.view();
        self.track(child, &view);
        view
    }

    fn deactivate_and_detach<C: ViewRouting>(&self, child: &C) -> Arc<HostedView> {
        child.interactor().deactivate();
        self.detach_child(child);
        let view = child.view();
        self.hosted.lock().remove(&child.id());
        // The router is removing the view itself; nothing left to auto-detach.
        view.clear_removal_handler();
        view
    }

    fn track<C: ViewRouting + 'static>(&self, child: &Arc<C>, view: &Arc<HostedView>) {
        let child_id = child.id();
        let parent = self.node.downgrade();
        let hosted = Arc::downgrade(&self.hosted);
        let weak_child = Arc::downgrade(child);

        view.set_removal_handler(move |event| {
            if let Some(hosted) = hosted.upgrade() {
                hosted.lock().remove(&child_id);
            }
            let Some(child) = weak_child.upgrade() else {
                return;
            };
            if !parent.contains(child_id) {
                return;
            }
            tracing::debug!(
                parent = %parent.id(),
                child = %child_id,
                ?event,
                "view removed outside router, detaching child"
            );
            child.interactor().deactivate();
            parent.detach(child_id);
        });
        self.hosted.lock().insert(child_id, Arc::downgrade(view));
    }
}

impl<S, A> Routing for HostingRouter<S, A>
where
    S: FeatureState,
    A: Action,
{
    fn node(&self) -> &RouterNode {
        &self.node
    }
}

impl<S, A> ViewRouting for HostingRouter<S, A>
where
    S: FeatureState,
    A: Action + LifecycleActionConvertible,
{
    fn view(&self) -> Arc<HostedView> {
        Arc::clone(&self.view)
    }

    fn interactor(&self) -> Arc<dyn Interactable> {
        Arc::clone(&self.interactor) as Arc<dyn Interactable>
    }
}

impl<S, A> Drop for HostingRouter<S, A> {
    fn drop(&mut self) {
        let hosted: Vec<_> = self.hosted.lock().drain().map(|(_, view)| view).collect();
        for view in hosted.iter().filter_map(Weak::upgrade) {
            view.clear_removal_handler();
        }
    }
}

impl<S: fmt::Debug, A> fmt::Debug for HostingRouter<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostingRouter")
            .field("node", &self.node)
            .field("view", &self.view)
            .field("interactor", &self.interactor)
            .finish()
    }
}
