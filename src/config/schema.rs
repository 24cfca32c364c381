//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::{RouteSpec, RouteTable, RouteTableBuilder, SensitiveParams, ViewId};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Resolution limits and startup checks.
    pub resolver: ResolverConfig,

    /// Redaction inputs for the analytics layer.
    pub analytics: AnalyticsConfig,

    /// Route definitions in precedence order. Empty selects the built-in
    /// console table.
    pub routes: Vec<RouteConfig>,
}

impl RouterConfig {
    /// Builder for the configured routes, or `None` to use the console table.
    pub fn route_builder(&self) -> Option<RouteTableBuilder> {
        if self.routes.is_empty() {
            None
        } else {
            Some(build_routes(&self.routes))
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error, off).
    pub log_level: String,

    /// Output format for log lines.
    pub log_format: LogFormat,

    /// Install a Prometheus recorder for resolution metrics.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
        }
    }
}

/// Resolver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Redirects followed per scope before failing with a hop-limit error.
    pub max_hops: usize,

    /// Refuse to start when a route names a view the console does not provide.
    pub require_known_views: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_hops: crate::routing::DEFAULT_MAX_HOPS,
            require_known_views: true,
        }
    }
}

/// Analytics redaction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Parameter names whose values identify a user.
    pub sensitive_params: Vec<String>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            sensitive_params: vec!["db".to_string(), "tbl".to_string()],
        }
    }
}

impl AnalyticsConfig {
    pub fn sensitive(&self) -> SensitiveParams {
        SensitiveParams::new(self.sensitive_params.iter().cloned())
    }
}

/// One route. Exactly one of `view`, `redirect`, `mount`, `not_found` is set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path template (`/node/:nodeId`, `*`).
    pub path: String,

    /// Require the whole path to match (default: true).
    #[serde(default = "default_exact")]
    pub exact: bool,

    /// Terminal view name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,

    /// Redirect target template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    /// Wrapper view name; makes this route a mount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount: Option<String>,

    /// Resolve to not-found.
    #[serde(default)]
    pub not_found: bool,

    /// Mount only: where the bare mount path lands, relative to the mount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Mount only: nested routes, relative to the mount.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteConfig>,
}

fn default_exact() -> bool {
    true
}

impl RouteConfig {
    /// Number of targets set; validation requires exactly one.
    pub fn target_count(&self) -> usize {
        [
            self.view.is_some(),
            self.redirect.is_some(),
            self.mount.is_some(),
            self.not_found,
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    fn spec(&self) -> Option<RouteSpec> {
        if let Some(view) = &self.view {
            return Some(RouteSpec::View(ViewId::new(view.as_str())));
        }
        if let Some(to) = &self.redirect {
            return Some(RouteSpec::Redirect(to.clone()));
        }
        if let Some(wrapper) = &self.mount {
            let mut nested = RouteTable::builder();
            if let Some(default) = &self.default {
                nested = nested.exact_redirect("/", default);
            }
            for route in &self.routes {
                nested = push_route(nested, route);
            }
            return Some(RouteSpec::Mount {
                wrapper: ViewId::new(wrapper.as_str()),
                routes: nested,
            });
        }
        self.not_found.then_some(RouteSpec::NotFound)
    }
}

/// Translate validated route configs into a builder, preserving order.
pub fn build_routes(routes: &[RouteConfig]) -> RouteTableBuilder {
    routes.iter().fold(RouteTable::builder(), push_route)
}

fn push_route(builder: RouteTableBuilder, route: &RouteConfig) -> RouteTableBuilder {
    match route.spec() {
        Some(spec) => builder.route(route.path.as_str(), route.exact, spec),
        None => builder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert_eq!(config.resolver.max_hops, 10);
        assert!(config.resolver.require_known_views);
        assert_eq!(config.analytics.sensitive_params, vec!["db", "tbl"]);
        assert!(config.route_builder().is_none());
    }

    #[test]
    fn test_parse_routes() {
        let config: RouterConfig = toml::from_str(
            r#"
            [resolver]
            max_hops = 4

            [[routes]]
            path = "/"
            redirect = "/home"

            [[routes]]
            path = "/home"
            view = "Home"

            [[routes]]
            path = "/admin"
            mount = "AdminLayout"
            default = "/users"

              [[routes.routes]]
              path = "/users"
              view = "Users"

            [[routes]]
            path = "*"
            exact = false
            not_found = true
            "#,
        )
        .unwrap();

        assert_eq!(config.resolver.max_hops, 4);
        assert_eq!(config.routes.len(), 4);
        assert!(config.routes[0].exact);
        assert_eq!(config.routes[2].routes.len(), 1);
        assert!(config.routes.iter().all(|r| r.target_count() == 1));

        let table = config.route_builder().unwrap().build().unwrap();
        assert_eq!(table.len(), 4);
        // `default` becomes the nested table's first entry.
        match table.entries()[2].kind() {
            crate::routing::RouteKind::Mount(mount) => assert_eq!(mount.table().len(), 2),
            other => panic!("expected mount, got {other:?}"),
        }
    }
}
