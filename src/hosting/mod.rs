//! Headless view hosting and the routers that drive it.
//!
//! ```text
//! HostingRouter ── attach + activate + push ──▶ NavigationStack
//!      ▲                                              │
//!      └──── one-shot RemovalEvent (swipe-back) ──────┘
//! ```

mod container;
mod launch;
mod router;
mod view;

pub use container::{
    ModalPresenter, NavigationContainer, NavigationStack, PresentationContainer, Window,
};
pub use launch::{LaunchRouting, NavigationLaunchRouter};
pub use router::{HostingRouter, ViewRouting};
pub use view::{HostedView, RemovalEvent, ViewId};
