//! Redirect chain following.
//!
//! # Responsibilities
//! - Resolve a path within one table, rewriting through redirect entries
//! - Detect revisited paths (cycles) and runaway chains (hop limit)
//! - Verify at startup that every redirect in a table terminates
//!
//! # Design Decisions
//! - The chain is scoped to one table; a mount starts a fresh chain
//! - Cycle detection compares normalized paths, so `/a/` and `/a` are one node
//! - A misconfigured table is an error, never an endless loop

use serde::Serialize;
use thiserror::Error;

use crate::routing::matcher::{join_under, normalize, PathPattern, PatternMatch, Segment};
use crate::routing::params::ParameterSet;
use crate::routing::router::{Mount, RouteKind, RouteTable, TableError};
use crate::routing::view::ViewId;

/// Redirects followed before giving up on a chain.
pub const DEFAULT_MAX_HOPS: usize = 10;

/// Route table misconfiguration discovered while following redirects.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum RoutingError {
    #[error("redirect cycle back to `{path}` ({})", .chain.join(" -> "))]
    CycleDetected { path: String, chain: Vec<String> },

    #[error("more than {limit} redirects ({})", .chain.join(" -> "))]
    HopLimitExceeded { limit: usize, chain: Vec<String> },
}

impl RoutingError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RoutingError::CycleDetected { .. } => "cycle_detected",
            RoutingError::HopLimitExceeded { .. } => "hop_limit_exceeded",
        }
    }

    /// Re-express every path in this error under a mount `prefix`.
    pub(crate) fn under_mount(self, prefix: &str) -> Self {
        let rebase = |chain: Vec<String>| -> Vec<String> {
            chain.iter().map(|p| join_under(prefix, p)).collect()
        };
        match self {
            RoutingError::CycleDetected { path, chain } => RoutingError::CycleDetected {
                path: join_under(prefix, &path),
                chain: rebase(chain),
            },
            RoutingError::HopLimitExceeded { limit, chain } => RoutingError::HopLimitExceeded {
                limit,
                chain: rebase(chain),
            },
        }
    }

    /// Every path visited, starting path first, including the offending one.
    pub fn chain(&self) -> &[String] {
        match self {
            RoutingError::CycleDetected { chain, .. } => chain,
            RoutingError::HopLimitExceeded { chain, .. } => chain,
        }
    }
}

/// Where a redirect chain stopped.
#[derive(Debug)]
pub enum ChainEnd<'t> {
    View { view: &'t ViewId, params: ParameterSet },
    Mount { mount: &'t Mount, matched: PatternMatch },
    /// No entry matched, or a not-found entry did.
    NotFound,
}

/// A completed chain within one table.
#[derive(Debug)]
pub struct Followed<'t> {
    /// Visited paths, starting path first. Never empty.
    pub chain: Vec<String>,
    pub end: ChainEnd<'t>,
}

impl Followed<'_> {
    pub fn hops(&self) -> usize {
        self.chain.len() - 1
    }

    pub fn final_path(&self) -> &str {
        self.chain.last().map(String::as_str).unwrap_or("/")
    }
}

/// Resolve `start` against `table`, following redirects until a
/// non-redirect outcome.
pub fn follow_redirects<'t>(
    table: &'t RouteTable,
    start: &str,
    max_hops: usize,
) -> Result<Followed<'t>, RoutingError> {
    let mut chain = vec![normalize(start)];

    loop {
        let current = &chain[chain.len() - 1];

        let Some((entry, matched)) = table.first_match(current) else {
            return Ok(Followed { chain, end: ChainEnd::NotFound });
        };

        let template = match entry.kind() {
            RouteKind::Redirect(template) => template,
            RouteKind::View(view) => {
                let end = ChainEnd::View { view, params: matched.params };
                return Ok(Followed { chain, end });
            }
            RouteKind::Mount(mount) => {
                let end = ChainEnd::Mount { mount, matched };
                return Ok(Followed { chain, end });
            }
            RouteKind::NotFound => {
                return Ok(Followed { chain, end: ChainEnd::NotFound });
            }
        };

        let next = template.render(&matched.params);
        tracing::trace!(from = %current, to = %next, order = entry.order(), "Following redirect");

        if chain.contains(&next) {
            chain.push(next.clone());
            return Err(RoutingError::CycleDetected { path: next, chain });
        }
        if chain.len() > max_hops {
            chain.push(next);
            return Err(RoutingError::HopLimitExceeded { limit: max_hops, chain });
        }
        chain.push(next);
    }
}

impl RouteTable {
    /// Follow every redirect in the tree from a sample path and fail if any
    /// chain cycles or overruns `max_hops`.
    pub fn verify_redirects(&self, max_hops: usize) -> Result<(), TableError> {
        for entry in self.entries() {
            match entry.kind() {
                RouteKind::Redirect(_) => {
                    let sample = sample_path(entry.pattern());
                    follow_redirects(self, &sample, max_hops).map_err(|source| {
                        TableError::RedirectLoop {
                            pattern: entry.pattern().to_string(),
                            source,
                        }
                    })?;
                }
                RouteKind::Mount(mount) => {
                    mount.table().verify_redirects(max_hops).map_err(|e| TableError::Mount {
                        prefix: entry.pattern().to_string(),
                        source: Box::new(e),
                    })?;
                }
                RouteKind::View(_) | RouteKind::NotFound => {}
            }
        }
        Ok(())
    }
}

/// A concrete path matched by `pattern`: parameters take their own name.
fn sample_path(pattern: &PathPattern) -> String {
    let parts: Vec<&str> = pattern
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Literal(text) | Segment::Param(text) => text.as_str(),
            Segment::Wildcard => "",
        })
        .collect();
    normalize(&parts.join("/"))
}
