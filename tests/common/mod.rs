//! Shared test features, routers and polling helpers.

#![allow(dead_code, unused_imports)]

use composable_ribs::routing::RouterNode;
use composable_ribs::{
    Action, DelegateActionExtractable, Effect, FeatureState, HostedView, HostingRouter,
    Interactable, LifecycleAction, LifecycleActionConvertible, LifecycleInteractor, ManagedTask,
    Reducer, Routing, ViewRouting,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

// -- Lifecycle feature --------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleState {
    pub is_active: bool,
    pub value: i32,
    pub activations: u32,
    pub deactivations: u32,
}

impl FeatureState for ModuleState {}

#[derive(Debug, Clone, PartialEq)]
pub enum ModuleAction {
    Lifecycle(LifecycleAction),
    Noop,
}

impl Action for ModuleAction {}

impl LifecycleActionConvertible for ModuleAction {
    fn from_lifecycle(action: LifecycleAction) -> Self {
        ModuleAction::Lifecycle(action)
    }
}

pub type ModuleInteractor = LifecycleInteractor<ModuleState, ModuleAction>;
pub type ModuleRouter = HostingRouter<ModuleState, ModuleAction>;

/// Tracks activation and nothing else.
pub struct ModuleFeature;

impl Reducer for ModuleFeature {
    type State = ModuleState;
    type Action = ModuleAction;

    fn reduce(&self, state: &mut ModuleState, action: ModuleAction) -> Effect<ModuleAction> {
        match action {
            ModuleAction::Lifecycle(LifecycleAction::DidBecomeActive) => {
                state.is_active = true;
                state.activations += 1;
            }
            ModuleAction::Lifecycle(LifecycleAction::WillResignActive) => {
                state.is_active = false;
                state.deactivations += 1;
            }
            ModuleAction::Noop => {}
        }
        Effect::none()
    }
}

pub fn make_module_interactor(value: i32) -> Arc<ModuleInteractor> {
    Arc::new(LifecycleInteractor::from_reducer(
        ModuleState {
            value,
            ..ModuleState::default()
        },
        ModuleFeature,
    ))
}

pub fn make_module_router(title: &str) -> (Arc<ModuleRouter>, Arc<ModuleInteractor>) {
    let interactor = make_module_interactor(0);
    let title = title.to_string();
    let router = Arc::new(HostingRouter::new(Arc::clone(&interactor), move |_| {
        HostedView::new(title)
    }));
    (router, interactor)
}

// -- Counter feature with delegate events ------------------------------------

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CounterState {
    pub count: i32,
}

impl FeatureState for CounterState {}

#[derive(Debug, Clone, PartialEq)]
pub enum CounterAction {
    IncrementTapped,
    CloseTapped,
    Lifecycle(LifecycleAction),
    Delegate(CounterDelegate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CounterDelegate {
    Incremented(i32),
    CloseRequested,
}

impl Action for CounterAction {}

impl LifecycleActionConvertible for CounterAction {
    fn from_lifecycle(action: LifecycleAction) -> Self {
        CounterAction::Lifecycle(action)
    }
}

impl DelegateActionExtractable for CounterAction {
    type Delegate = CounterDelegate;

    fn delegate_event(&self) -> Option<CounterDelegate> {
        match self {
            CounterAction::Delegate(event) => Some(event.clone()),
            _ => None,
        }
    }
}

/// Counts taps and reports them upstream as delegate events.
pub struct CounterFeature;

impl Reducer for CounterFeature {
    type State = CounterState;
    type Action = CounterAction;

    fn reduce(&self, state: &mut CounterState, action: CounterAction) -> Effect<CounterAction> {
        match action {
            CounterAction::IncrementTapped => {
                state.count += 1;
                Effect::send(CounterAction::Delegate(CounterDelegate::Incremented(
                    state.count,
                )))
            }
            CounterAction::CloseTapped => {
                Effect::send(CounterAction::Delegate(CounterDelegate::CloseRequested))
            }
            CounterAction::Lifecycle(_) | CounterAction::Delegate(_) => Effect::none(),
        }
    }
}

// -- Spy router ---------------------------------------------------------------

/// Interactor recording how often each lifecycle call happened.
#[derive(Debug, Default)]
pub struct SpyInteractor {
    activations: AtomicUsize,
    deactivations: AtomicUsize,
}

impl SpyInteractor {
    pub fn activate_count(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }

    pub fn deactivate_count(&self) -> usize {
        self.deactivations.load(Ordering::SeqCst)
    }
}

impl Interactable for SpyInteractor {
    fn activate(&self) {
        self.activations.fetch_add(1, Ordering::SeqCst);
    }

    fn deactivate(&self) {
        self.deactivations.fetch_add(1, Ordering::SeqCst);
    }
}

/// View router driven by a [`SpyInteractor`].
pub struct SpyRouter {
    node: RouterNode,
    view: Arc<HostedView>,
    pub spy: Arc<SpyInteractor>,
}

impl SpyRouter {
    pub fn new(title: &str) -> Arc<Self> {
        Arc::new(Self {
            node: RouterNode::new(),
            view: Arc::new(HostedView::new(title)),
            spy: Arc::new(SpyInteractor::default()),
        })
    }
}

impl Routing for SpyRouter {
    fn node(&self) -> &RouterNode {
        &self.node
    }
}

impl ViewRouting for SpyRouter {
    fn view(&self) -> Arc<HostedView> {
        Arc::clone(&self.view)
    }

    fn interactor(&self) -> Arc<dyn Interactable> {
        Arc::clone(&self.spy) as Arc<dyn Interactable>
    }
}

// -- Cancellation probe -------------------------------------------------------

/// Counts managed tasks that observed their cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct CancellationProbe {
    cancelled: Arc<AtomicUsize>,
}

impl CancellationProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task that idles until cancelled, then records it.
    pub fn spawn(&self) -> ManagedTask {
        let cancelled = Arc::clone(&self.cancelled);
        ManagedTask::spawn(move |token| async move {
            token.cancelled().await;
            cancelled.fetch_add(1, Ordering::SeqCst);
        })
    }

    pub fn cancelled_count(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// -- Polling ------------------------------------------------------------------

/// Poll `condition` until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

// -- Config -------------------------------------------------------------------

/// Write `content` to a config file inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
