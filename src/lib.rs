//! Router-tree composition for reducer-driven features.
//!
//! Features are pure reducers over their own state and actions. A tree of
//! routers owns navigation, view hosting and lifecycle: parents attach,
//! activate, deactivate and detach children in lock-step, and listen to child
//! delegate events through an [`ActionRelay`] instead of reaching into child
//! stores.
//!
//! ```text
//! Builder ──▶ Store(ActionObservingReducer ─▶ ActionRelay)
//!        ──▶ LifecycleInteractor(store, relay)
//!        ──▶ HostingRouter(interactor, view)
//! ```

pub mod config;
pub mod feature;
pub mod hosting;
pub mod lifecycle;
pub mod logging;
pub mod relay;
pub mod routing;
pub mod task;

pub use config::{Config, ConfigError, LifecycleConfig, LoggingConfig};
pub use feature::{
    Action, ActionObservingReducer, Effect, EffectId, EffectSender, FeatureState, Reduce,
    Reducer, Store, StoreOf,
};
pub use hosting::{
    HostedView, HostingRouter, LaunchRouting, ModalPresenter, NavigationContainer,
    NavigationLaunchRouter, NavigationStack, PresentationContainer, RemovalEvent, ViewId,
    ViewRouting, Window,
};
pub use lifecycle::{
    DelegateActionExtractable, Interactable, LifecycleAction, LifecycleActionConvertible,
    LifecycleError, LifecycleInteractor,
};
pub use relay::{ActionRelay, ActionStream, ObserverToken};
pub use routing::{BaseRouter, Buildable, Component, Dependency, NodeId, Routing};
pub use task::{CancelToken, ManagedTask, TaskId};
