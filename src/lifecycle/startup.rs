//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Compile the route table (configured or built-in console table)
//! - Verify every redirect terminates and every view is known
//! - Report the parameterized patterns the analytics layer must redact
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal; a bad table never serves a path
//! - The table is built exactly once and shared read-only afterwards

use thiserror::Error;

use crate::config::{validate_config, ConfigError, RouterConfig};
use crate::console::{self, views::ConsoleViews};
use crate::routing::{Resolver, TableError, ViewId};

/// Reasons the router refuses to start.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid route table: {0}")]
    Table(#[from] TableError),

    #[error("routes reference unknown views: {}", join_views(.0))]
    UnknownViews(Vec<ViewId>),
}

fn join_views(views: &[ViewId]) -> String {
    views.iter().map(ViewId::as_str).collect::<Vec<_>>().join(", ")
}

/// Build and verify the resolver described by `config`.
pub fn build_resolver(config: &RouterConfig) -> Result<Resolver, StartupError> {
    validate_config(config).map_err(ConfigError::Validation)?;

    let (source, builder) = match config.route_builder() {
        Some(builder) => ("config", builder),
        None => ("console", console::builder()),
    };

    let table = builder.build()?;
    table.verify_redirects(config.resolver.max_hops)?;

    if config.resolver.require_known_views {
        let unknown = table.unknown_views(&ConsoleViews);
        if !unknown.is_empty() {
            return Err(StartupError::UnknownViews(unknown));
        }
    }

    let inventory = table.inventory(&config.analytics.sensitive());
    for pattern in inventory.sensitive() {
        tracing::debug!(template = %pattern.template, "Route captures identifying parameters");
    }

    tracing::info!(
        source,
        routes = table.len(),
        redirects = table.redirect_count(),
        parameterized = inventory.len(),
        sensitive = inventory.sensitive().count(),
        max_hops = config.resolver.max_hops,
        "Route table ready"
    );

    Ok(Resolver::new(table).with_max_hops(config.resolver.max_hops))
}
