//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validate config → Compile table → Verify redirects and views → Resolver
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then table, then verification
//! - Nothing resolves until verification has passed

pub mod startup;

pub use startup::{build_resolver, StartupError};
