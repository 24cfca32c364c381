//! Path resolution entry point.
//!
//! # Responsibilities
//! - Resolve a navigation path to a view, a redirected view, or not-found
//! - Descend into mounts, collecting wrapper bindings outermost-first
//! - Pass any query string or fragment through to a redirected path
//! - Record outcome metrics and structured logs per resolution
//!
//! # Design Decisions
//! - Pure function of (path, table): the table is shared read-only via `Arc`
//! - `Redirected` reflects the top-level chain only; redirects inside a
//!   mount stay internal to that mount's scope
//! - Misconfiguration surfaces as `RoutingError`, never as not-found

use std::sync::Arc;

use serde::Serialize;

use crate::observability::metrics;
use crate::routing::matcher::{consumed_prefix, join_under, split_suffix};
use crate::routing::params::ParameterSet;
use crate::routing::redirect::{follow_redirects, ChainEnd, RoutingError, DEFAULT_MAX_HOPS};
use crate::routing::router::RouteTable;
use crate::routing::view::{ViewBinding, ViewId};

/// Outcome of resolving one navigation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// The path itself names a view.
    Terminal {
        view: ViewId,
        params: ParameterSet,
        wrappers: Vec<ViewBinding>,
    },
    /// The path was rewritten one or more times before reaching a view.
    Redirected {
        /// Full rewritten path, mount prefixes included, with the original
        /// query or fragment re-appended.
        final_path: String,
        view: ViewId,
        params: ParameterSet,
        wrappers: Vec<ViewBinding>,
    },
    /// Nothing but a catch-all (or nothing at all) matched.
    NotFound {
        path: String,
        wrappers: Vec<ViewBinding>,
    },
}

impl Resolution {
    pub fn view(&self) -> Option<&ViewId> {
        match self {
            Resolution::Terminal { view, .. } | Resolution::Redirected { view, .. } => Some(view),
            Resolution::NotFound { .. } => None,
        }
    }

    pub fn params(&self) -> Option<&ParameterSet> {
        match self {
            Resolution::Terminal { params, .. } | Resolution::Redirected { params, .. } => {
                Some(params)
            }
            Resolution::NotFound { .. } => None,
        }
    }

    /// Mount wrappers to compose around the view, outermost first.
    pub fn wrappers(&self) -> &[ViewBinding] {
        match self {
            Resolution::Terminal { wrappers, .. }
            | Resolution::Redirected { wrappers, .. }
            | Resolution::NotFound { wrappers, .. } => wrappers,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound { .. })
    }

    /// Short label for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::Terminal { .. } => "terminal",
            Resolution::Redirected { .. } => "redirected",
            Resolution::NotFound { .. } => "not_found",
        }
    }
}

/// Resolved state of one table scope.
struct ScopeEnd {
    hops: usize,
    final_path: String,
    binding: Option<ViewBinding>,
}

/// Resolves paths against a shared, immutable route table.
#[derive(Debug, Clone)]
pub struct Resolver {
    table: Arc<RouteTable>,
    max_hops: usize,
}

impl Resolver {
    pub fn new(table: impl Into<Arc<RouteTable>>) -> Self {
        Self {
            table: table.into(),
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    /// Override the per-scope redirect limit.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Resolve `path` to a view binding.
    pub fn resolve(&self, path: &str) -> Result<Resolution, RoutingError> {
        let (route_path, suffix) = split_suffix(path);
        let mut wrappers = Vec::new();

        let scope = match self.resolve_in(&self.table, route_path, &mut wrappers) {
            Ok(scope) => scope,
            Err(e) => {
                tracing::error!(path = %path, error = %e, "Route table misconfigured");
                metrics::record_routing_error(e.kind());
                return Err(e);
            }
        };

        let resolution = match scope.binding {
            Some(ViewBinding { view, params }) if scope.hops == 0 => Resolution::Terminal {
                view,
                params,
                wrappers,
            },
            Some(ViewBinding { view, params }) => Resolution::Redirected {
                final_path: format!("{}{}", scope.final_path, suffix),
                view,
                params,
                wrappers,
            },
            None => Resolution::NotFound {
                path: scope.final_path,
                wrappers,
            },
        };

        tracing::debug!(
            path = %path,
            outcome = resolution.outcome(),
            view = resolution.view().map(ViewId::as_str).unwrap_or("-"),
            hops = scope.hops,
            "Path resolved"
        );
        metrics::record_resolution(resolution.outcome(), scope.hops);

        Ok(resolution)
    }

    fn resolve_in(
        &self,
        table: &RouteTable,
        path: &str,
        wrappers: &mut Vec<ViewBinding>,
    ) -> Result<ScopeEnd, RoutingError> {
        let followed = follow_redirects(table, path, self.max_hops)?;
        let hops = followed.hops();
        let mut final_path = followed.final_path().to_string();

        let binding = match followed.end {
            ChainEnd::View { view, params } => Some(ViewBinding {
                view: view.clone(),
                params,
            }),
            ChainEnd::NotFound => None,
            ChainEnd::Mount { mount, matched } => {
                let prefix = consumed_prefix(&final_path, &matched.remainder);
                wrappers.push(ViewBinding {
                    view: mount.wrapper().clone(),
                    params: matched.params,
                });
                let nested = self
                    .resolve_in(mount.table(), &matched.remainder, wrappers)
                    .map_err(|e| e.under_mount(&prefix))?;
                final_path = join_under(&prefix, &nested.final_path);
                nested.binding
            }
        };

        Ok(ScopeEnd {
            hops,
            final_path,
            binding,
        })
    }
}
