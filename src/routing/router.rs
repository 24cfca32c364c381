//! Route tables and first-match lookup.
//!
//! # Responsibilities
//! - Compile route definitions into an ordered, immutable table
//! - Validate redirect templates against the pattern they rewrite
//! - Look up the first entry matching a path, or report no match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - `order` is the entry's position; lower order always wins
//! - O(n) scan in order; nothing after the first match is inspected
//! - Mounts own their nested table outright (tree, never a graph)

use std::collections::BTreeSet;

use thiserror::Error;

use crate::routing::matcher::{PathPattern, PatternError, PatternMatch, Segment};
use crate::routing::params::ParameterSet;
use crate::routing::redirect::RoutingError;
use crate::routing::view::{ViewId, ViewRegistry};

/// Errors raised while building or verifying a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("route #{order}: {source}")]
    Pattern { order: usize, source: PatternError },

    #[error("route #{order}: redirect target: {source}")]
    Template { order: usize, source: PatternError },

    #[error("redirect `{from}` -> `{to}` uses parameter `{name}` that `{from}` does not bind")]
    UnboundParam { from: String, to: String, name: String },

    #[error("redirect `{from}` -> `{to}` uses a wildcard but `{from}` has none")]
    UnboundWildcard { from: String, to: String },

    #[error("in mount `{prefix}`: {source}")]
    Mount { prefix: String, source: Box<TableError> },

    #[error("redirect `{pattern}` does not terminate: {source}")]
    RedirectLoop { pattern: String, source: RoutingError },
}

/// Output side of a redirect: a pattern whose parameters are all bound by
/// the input pattern it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTemplate {
    pattern: PathPattern,
}

impl RedirectTemplate {
    /// Compile `to` as the rewrite target of `from`.
    pub fn compile(from: &PathPattern, to: &str) -> Result<Self, TableError> {
        // Order is patched in by the builder; the template only knows itself.
        let pattern = PathPattern::parse(to, true)
            .map_err(|source| TableError::Template { order: 0, source })?;

        let bound: BTreeSet<&str> = from.param_names().collect();
        for segment in pattern.segments() {
            match segment {
                Segment::Param(name) if !bound.contains(name.as_str()) => {
                    return Err(TableError::UnboundParam {
                        from: from.to_string(),
                        to: to.to_string(),
                        name: name.clone(),
                    });
                }
                Segment::Wildcard if !from.has_wildcard() => {
                    return Err(TableError::UnboundWildcard {
                        from: from.to_string(),
                        to: to.to_string(),
                    });
                }
                _ => {}
            }
        }

        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Build the rewritten path from the parameters captured by the input match.
    pub fn render(&self, params: &ParameterSet) -> String {
        self.pattern.render(params)
    }
}

/// A layout that consumes a path prefix and delegates the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    wrapper: ViewId,
    table: RouteTable,
}

impl Mount {
    /// The container view composed around whatever the nested table resolves.
    pub fn wrapper(&self) -> &ViewId {
        &self.wrapper
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }
}

/// What a matched entry does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// Terminal view binding.
    View(ViewId),
    /// Rewrite the path and resolve again.
    Redirect(RedirectTemplate),
    /// Strip the matched prefix and resolve the remainder in a nested table.
    Mount(Mount),
    /// Terminal not-found; normally the trailing catch-all.
    NotFound,
}

/// One compiled row of a [`RouteTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pattern: PathPattern,
    order: usize,
    kind: RouteKind,
}

impl RouteEntry {
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Position in the owning table. Lower order is checked first.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn kind(&self) -> &RouteKind {
        &self.kind
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.kind, RouteKind::Redirect(_))
    }
}

/// Ordered, immutable sequence of routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of redirect entries in this table (not counting mounts).
    pub fn redirect_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_redirect()).count()
    }

    /// First entry, in order, whose pattern matches `path`.
    pub fn first_match(&self, path: &str) -> Option<(&RouteEntry, PatternMatch)> {
        self.entries
            .iter()
            .find_map(|entry| entry.pattern.matches(path).map(|m| (entry, m)))
    }

    /// Views and wrappers referenced anywhere in the tree that `registry`
    /// does not know about.
    pub fn unknown_views(&self, registry: &dyn ViewRegistry) -> Vec<ViewId> {
        let mut unknown = BTreeSet::new();
        self.visit("", &mut |_: &str, entry: &RouteEntry| {
            let view = match &entry.kind {
                RouteKind::View(view) => view,
                RouteKind::Mount(mount) => &mount.wrapper,
                _ => return,
            };
            if !registry.contains(view) {
                unknown.insert(view.clone());
            }
        });
        unknown.into_iter().collect()
    }

    /// Depth-first walk over every entry. `f` receives the mount prefix the
    /// entry's table is nested under (`""` at the top level).
    pub(crate) fn visit<'a>(&'a self, prefix: &str, f: &mut dyn FnMut(&str, &'a RouteEntry)) {
        for entry in &self.entries {
            f(prefix, entry);
            if let RouteKind::Mount(mount) = &entry.kind {
                let nested = format!("{}{}", prefix, entry.pattern);
                mount.table.visit(nested.trim_end_matches('/'), f);
            }
        }
    }
}

/// Uncompiled target of a route.
#[derive(Debug, Clone)]
pub enum RouteSpec {
    View(ViewId),
    Redirect(String),
    Mount { wrapper: ViewId, routes: RouteTableBuilder },
    NotFound,
}

#[derive(Debug, Clone)]
struct PendingRoute {
    path: String,
    exact: bool,
    target: RouteSpec,
}

/// Collects route definitions in precedence order.
///
/// Nothing is compiled until [`RouteTableBuilder::build`], which rejects the
/// whole table on the first invalid definition.
#[derive(Debug, Clone, Default)]
pub struct RouteTableBuilder {
    routes: Vec<PendingRoute>,
}

impl RouteTableBuilder {
    /// Append a route. Its order is its position.
    pub fn route(mut self, path: impl Into<String>, exact: bool, target: RouteSpec) -> Self {
        self.routes.push(PendingRoute {
            path: path.into(),
            exact,
            target,
        });
        self
    }

    pub fn exact_view(self, path: &str, view: ViewId) -> Self {
        self.route(path, true, RouteSpec::View(view))
    }

    pub fn prefix_view(self, path: &str, view: ViewId) -> Self {
        self.route(path, false, RouteSpec::View(view))
    }

    pub fn exact_redirect(self, from: &str, to: &str) -> Self {
        self.route(from, true, RouteSpec::Redirect(to.to_string()))
    }

    pub fn prefix_redirect(self, from: &str, to: &str) -> Self {
        self.route(from, false, RouteSpec::Redirect(to.to_string()))
    }

    /// Mount `routes` under `prefix`, wrapped in `wrapper`. Always a prefix match.
    pub fn mount(self, prefix: &str, wrapper: ViewId, routes: RouteTableBuilder) -> Self {
        self.route(prefix, false, RouteSpec::Mount { wrapper, routes })
    }

    /// Catch-all resolving to not-found.
    pub fn not_found(self, path: &str) -> Self {
        self.route(path, false, RouteSpec::NotFound)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn build(self) -> Result<RouteTable, TableError> {
        let mut entries = Vec::with_capacity(self.routes.len());

        for (order, route) in self.routes.into_iter().enumerate() {
            let pattern = PathPattern::parse(&route.path, route.exact)
                .map_err(|source| TableError::Pattern { order, source })?;

            let (pattern, kind) = match route.target {
                RouteSpec::View(view) => (pattern, RouteKind::View(view)),
                RouteSpec::Redirect(to) => {
                    let template =
                        RedirectTemplate::compile(&pattern, &to).map_err(|e| match e {
                            TableError::Template { source, .. } => {
                                TableError::Template { order, source }
                            }
                            other => other,
                        })?;
                    (pattern, RouteKind::Redirect(template))
                }
                RouteSpec::Mount { wrapper, routes } => {
                    let table = routes.build().map_err(|e| TableError::Mount {
                        prefix: route.path.clone(),
                        source: Box::new(e),
                    })?;
                    (pattern.into_prefix(), RouteKind::Mount(Mount { wrapper, table }))
                }
                RouteSpec::NotFound => (pattern, RouteKind::NotFound),
            };

            entries.push(RouteEntry { pattern, order, kind });
        }

        Ok(RouteTable { entries })
    }
}
