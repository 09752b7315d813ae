//! Router tree: identity-deduplicated parent/child attachment.

mod builder;
mod node;
mod router;

pub use builder::{Buildable, Component, Dependency};
pub use node::{NodeId, RouterNode, WeakRouterNode};
pub use router::{BaseRouter, Routing};
