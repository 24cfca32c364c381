//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route names exactly one target
//! - Check mount-only fields appear only on mounts
//! - Validate value ranges (max_hops > 0, known log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Pattern and redirect-template errors are left to table compilation

use std::str::FromStr;

use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::config::schema::{RouteConfig, RouterConfig};

/// A semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route `{path}`: {found} targets set, expected exactly one")]
    TargetCount { path: String, found: usize },

    #[error("route `{path}`: nested routes are only allowed on a mount")]
    NestedWithoutMount { path: String },

    #[error("route `{path}`: `default` is only allowed on a mount")]
    DefaultWithoutMount { path: String },

    #[error("route `{path}`: mount has neither routes nor a default")]
    EmptyMount { path: String },

    #[error("route `{path}`: view name is empty")]
    EmptyViewName { path: String },

    #[error("resolver.max_hops must be greater than zero")]
    ZeroMaxHops,

    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),
}

/// Check `config` for semantic errors, collecting all of them.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.resolver.max_hops == 0 {
        errors.push(ValidationError::ZeroMaxHops);
    }
    if LevelFilter::from_str(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    validate_routes("", &config.routes, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(parent: &str, routes: &[RouteConfig], errors: &mut Vec<ValidationError>) {
    for route in routes {
        let path = format!("{}{}", parent, route.path);

        let found = route.target_count();
        if found != 1 {
            errors.push(ValidationError::TargetCount {
                path: path.clone(),
                found,
            });
        }

        let names = [route.view.as_deref(), route.mount.as_deref()];
        if names.iter().flatten().any(|name| name.trim().is_empty()) {
            errors.push(ValidationError::EmptyViewName { path: path.clone() });
        }

        if route.mount.is_some() {
            if route.routes.is_empty() && route.default.is_none() {
                errors.push(ValidationError::EmptyMount { path: path.clone() });
            }
            validate_routes(path.trim_end_matches('/'), &route.routes, errors);
        } else {
            if !route.routes.is_empty() {
                errors.push(ValidationError::NestedWithoutMount { path: path.clone() });
            }
            if route.default.is_some() {
                errors.push(ValidationError::DefaultWithoutMount { path });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str) -> RouteConfig {
        RouteConfig {
            path: path.to_string(),
            exact: true,
            view: None,
            redirect: None,
            mount: None,
            not_found: false,
            default: None,
            routes: Vec::new(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.resolver.max_hops = 0;
        config.observability.log_level = "loud".into();

        let mut both = route("/both");
        both.view = Some("A".into());
        both.redirect = Some("/b".into());

        let mut orphan = route("/orphan");
        orphan.view = Some("A".into());
        orphan.default = Some("/x".into());
        orphan.routes.push(route("/child"));

        config.routes = vec![both, route("/none"), orphan];

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroMaxHops));
        assert!(errors.contains(&ValidationError::InvalidLogLevel("loud".into())));
        assert!(errors.contains(&ValidationError::TargetCount { path: "/both".into(), found: 2 }));
        assert!(errors.contains(&ValidationError::TargetCount { path: "/none".into(), found: 0 }));
        assert!(errors.contains(&ValidationError::NestedWithoutMount { path: "/orphan".into() }));
        assert!(errors.contains(&ValidationError::DefaultWithoutMount { path: "/orphan".into() }));
    }

    #[test]
    fn test_nested_errors_carry_full_path() {
        let mut mount = route("/admin");
        mount.mount = Some("Layout".into());
        mount.routes.push(route("/users"));

        let config = RouterConfig {
            routes: vec![mount],
            ..RouterConfig::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::TargetCount { path: "/admin/users".into(), found: 0 }]
        );
    }

    #[test]
    fn test_empty_mount() {
        let mut mount = route("/admin");
        mount.mount = Some(" ".into());

        let config = RouterConfig {
            routes: vec![mount],
            ..RouterConfig::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::EmptyMount { path: "/admin".into() }));
        assert!(errors.contains(&ValidationError::EmptyViewName { path: "/admin".into() }));
    }
}
