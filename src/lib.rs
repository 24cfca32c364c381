//! Admin console navigation router.
//!
//! Resolves a client-side navigation path to a view binding, a redirected
//! view binding, or not-found, through an ordered table of path patterns
//! with legacy redirects and nested mounts.

pub mod config;
pub mod console;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use lifecycle::build_resolver;
pub use routing::{Resolution, Resolver, RouteTable, RoutingError};
