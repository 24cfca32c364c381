//! Shared helpers for integration tests.

#![allow(dead_code)]

use console_router::routing::{ParameterSet, Resolution, Resolver, RouteTable, ViewBinding, ViewId};
use console_router::{build_resolver, RouterConfig};

/// Resolver over the built-in console table, verified as at startup.
pub fn console_resolver() -> Resolver {
    build_resolver(&RouterConfig::default()).expect("console table must verify")
}

/// Resolve against the console table, panicking on a routing error.
pub fn resolve(path: &str) -> Resolution {
    console_resolver()
        .resolve(path)
        .unwrap_or_else(|e| panic!("routing error for {path}: {e}"))
}

/// Resolver over a hand-built table, without startup verification.
pub fn resolver_for(table: RouteTable) -> Resolver {
    Resolver::new(table)
}

pub fn params(pairs: &[(&str, &str)]) -> ParameterSet {
    pairs.iter().copied().collect()
}

pub fn wrapper(view: ViewId) -> ViewBinding {
    ViewBinding {
        view,
        params: ParameterSet::new(),
    }
}
