//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation path
//!     → resolver.rs (split query/fragment, start top-level scope)
//!     → redirect.rs (first match in table, rewrite through redirects)
//!     → router.rs   (ordered lookup: first matching entry wins)
//!     → matcher.rs  (segment-by-segment pattern match)
//!     → mount? strip prefix, push wrapper, resolve remainder in nested table
//!     → Resolution: Terminal | Redirected | NotFound, or RoutingError
//!
//! Route Compilation (at startup):
//!     RouteTableBuilder (code or config)
//!     → compile patterns and redirect templates
//!     → verify every redirect chain terminates
//!     → freeze as immutable RouteTable shared via Arc
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by position)

pub mod inventory;
pub mod matcher;
pub mod params;
pub mod redirect;
pub mod resolver;
pub mod router;
pub mod view;

pub use inventory::{PatternInventory, SensitiveParams};
pub use matcher::{PathPattern, PatternError, Segment};
pub use params::ParameterSet;
pub use redirect::{RoutingError, DEFAULT_MAX_HOPS};
pub use resolver::{Resolution, Resolver};
pub use router::{RouteEntry, RouteKind, RouteSpec, RouteTable, RouteTableBuilder, TableError};
pub use view::{ViewBinding, ViewId, ViewRegistry};
