//! Route tables loaded from TOML configuration.

use std::io::Write;

use console_router::config::load_config;
use console_router::lifecycle::{build_resolver, StartupError};
use console_router::routing::{Resolution, TableError, ViewId};

mod common;

use common::{params, wrapper};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const APP: &str = r#"
[resolver]
max_hops = 5
require_known_views = false

[analytics]
sensitive_params = ["user"]

[[routes]]
path = "/"
redirect = "/home"

[[routes]]
path = "/home"
view = "Home"

[[routes]]
path = "/users/:user"
exact = false
view = "Profile"

[[routes]]
path = "/settings"
mount = "SettingsLayout"
default = "/general"

  [[routes.routes]]
  path = "/general"
  view = "GeneralSettings"

  [[routes.routes]]
  path = "/keys/:keyId"
  view = "KeySettings"

[[routes]]
path = "*"
exact = false
not_found = true
"#;

#[test]
fn test_config_driven_table() {
    let file = write_config(APP);
    let config = load_config(file.path()).unwrap();
    let resolver = build_resolver(&config).unwrap();
    assert_eq!(resolver.max_hops(), 5);

    assert_eq!(
        resolver.resolve("/").unwrap(),
        Resolution::Redirected {
            final_path: "/home".into(),
            view: ViewId::new("Home"),
            params: params(&[]),
            wrappers: vec![],
        }
    );
    assert_eq!(
        resolver.resolve("/users/ada/activity").unwrap().params(),
        Some(&params(&[("user", "ada")]))
    );
    assert_eq!(
        resolver.resolve("/settings").unwrap(),
        Resolution::Terminal {
            view: ViewId::new("GeneralSettings"),
            params: params(&[]),
            wrappers: vec![wrapper(ViewId::new("SettingsLayout"))],
        }
    );
    assert_eq!(
        resolver.resolve("/settings/keys/k1").unwrap().params(),
        Some(&params(&[("keyId", "k1")]))
    );
    assert!(resolver.resolve("/elsewhere").unwrap().is_not_found());
}

#[test]
fn test_config_inventory_uses_sensitive_params() {
    let file = write_config(APP);
    let config = load_config(file.path()).unwrap();
    let resolver = build_resolver(&config).unwrap();

    let inventory = resolver.table().inventory(&config.analytics.sensitive());
    let templates: Vec<&str> = inventory.patterns().iter().map(|p| p.template.as_str()).collect();
    assert_eq!(templates, vec!["/users/:user", "/settings/keys/:keyId"]);

    let sensitive: Vec<&str> = inventory.sensitive().map(|p| p.template.as_str()).collect();
    assert_eq!(sensitive, vec!["/users/:user"]);
}

#[test]
fn test_invalid_pattern_refuses_start() {
    let file = write_config(
        r#"
        [resolver]
        require_known_views = false

        [[routes]]
        path = "/a/*/b"
        view = "A"
        "#,
    );
    let config = load_config(file.path()).unwrap();
    let err = build_resolver(&config).unwrap_err();
    assert!(matches!(err, StartupError::Table(_)));
}

#[test]
fn test_query_in_redirect_target_refuses_start() {
    let file = write_config(
        r#"
        [resolver]
        require_known_views = false

        [[routes]]
        path = "/old"
        redirect = "/new?tab=1"

        [[routes]]
        path = "/new"
        view = "New"
        "#,
    );
    let config = load_config(file.path()).unwrap();
    let err = build_resolver(&config).unwrap_err();
    assert!(matches!(err, StartupError::Table(TableError::Template { order: 0, .. })));
}

#[test]
fn test_console_views_accepted_by_default() {
    let file = write_config(
        r#"
        [[routes]]
        path = "/"
        view = "NodeList"
        "#,
    );
    let config = load_config(file.path()).unwrap();
    assert!(build_resolver(&config).is_ok());
}
