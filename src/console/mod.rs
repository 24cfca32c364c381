//! The admin console's route table.
//!
//! Old URLs stay valid forever: links to them live in bookmarks, docs and
//! support threads. Entry order is load-bearing. Several rows below are
//! shadowed by an earlier prefix rule (`/statement/:stmt` behind the
//! `/statement` redirect, `/statements/:app` behind `/statements`, and a few
//! report pages); they are kept in place so resolution stays identical to
//! what shipped.
//!
//! NOTE: a new parameterized path whose values identify a user (database or
//! table names, addresses) must be added to `analytics.sensitive_params`.

pub mod views;

use crate::routing::{RouteTable, RouteTableBuilder, TableError};

use self::views::*;

/// Build the console table.
pub fn route_table() -> Result<RouteTable, TableError> {
    builder().build()
}

/// The console routes, uncompiled.
pub fn builder() -> RouteTableBuilder {
    RouteTable::builder()
        // login
        .prefix_view("/login", LOGIN)
        .prefix_view("/logout", LOGOUT)
        .exact_redirect("/", "/overview/list")
        // overview
        .exact_redirect("/overview", "/overview/list")
        .prefix_view("/overview/list", NODE_LIST)
        .prefix_view("/overview/map", CLUSTER_MAP)
        // time series metrics
        .exact_redirect("/metrics", "/metrics/overview/cluster")
        .exact_redirect("/metrics/:dashboard", "/metrics/:dashboard/cluster")
        .exact_view("/metrics/:dashboard/cluster", NODE_GRAPHS)
        .exact_redirect("/metrics/:dashboard/node", "/metrics/:dashboard/cluster")
        .prefix_view("/metrics/:dashboard/node/:nodeId", NODE_GRAPHS)
        // node details
        .exact_redirect("/node", "/overview/list")
        .exact_view("/node/:nodeId", NODE_OVERVIEW)
        .prefix_view("/node/:nodeId/logs", NODE_LOGS)
        // events & jobs
        .prefix_view("/events", EVENTS)
        .prefix_view("/jobs", JOBS)
        // databases
        .exact_redirect("/databases", "/databases/tables")
        .prefix_view("/databases/tables", DATABASE_TABLES)
        .prefix_view("/databases/grants", DATABASE_GRANTS)
        .prefix_redirect(
            "/databases/database/:db/table/:tbl",
            "/database/:db/table/:tbl",
        )
        .exact_redirect("/database", "/databases")
        .exact_redirect("/database/:db", "/databases")
        .exact_redirect("/database/:db/table", "/databases")
        .prefix_view("/database/:db/table/:tbl", TABLE_DETAILS)
        // data distribution
        .prefix_view("/data-distribution", DATA_DISTRIBUTION)
        // statement statistics
        .prefix_view("/statements", STATEMENTS)
        .prefix_view("/statements/:app", STATEMENTS)
        .prefix_view("/statements/:app/:stmt", STATEMENT_DETAILS)
        .prefix_view("/statements/:app/:txn/:stmt", STATEMENT_DETAILS)
        .prefix_redirect("/statement", "/statements")
        .prefix_view("/statement/:stmt", STATEMENT_DETAILS)
        .prefix_view("/statement/:txn/:stmt", STATEMENT_DETAILS)
        // debug pages
        .exact_view("/debug", DEBUG)
        .prefix_view("/debug/redux", REDUX_DEBUG)
        .prefix_view("/debug/chart", CUSTOM_CHART)
        .prefix_view("/debug/enqueue_range", ENQUEUE_RANGE)
        .mount("/raft", RAFT, raft_routes())
        // reports
        .prefix_view("/reports/problemranges", PROBLEM_RANGES)
        .prefix_view("/reports/problemranges/:nodeId", PROBLEM_RANGES)
        .prefix_view("/reports/localities", LOCALITIES)
        .prefix_view("/reports/network/:nodeId", NETWORK)
        .prefix_view("/reports/network", NETWORK)
        .prefix_view("/reports/nodes", NODES_REPORT)
        .prefix_view("/reports/nodes/history", DECOMMISSIONED_HISTORY)
        .prefix_view("/reports/settings", SETTINGS)
        .prefix_view("/reports/certificates/:nodeId", CERTIFICATES)
        .prefix_view("/reports/range/:rangeId", RANGE)
        .prefix_view("/reports/stores/:nodeId", STORES)
        // old route redirects
        .exact_redirect("/cluster", "/metrics/overview/cluster")
        .prefix_redirect("/cluster/all/:dashboard", "/metrics/:dashboard/cluster")
        .prefix_redirect(
            "/cluster/node/:nodeId/:dashboard",
            "/metrics/:dashboard/node/:nodeId",
        )
        .exact_redirect("/cluster/nodes", "/overview/list")
        .exact_redirect("/cluster/nodes/:nodeId", "/node/:nodeId")
        .prefix_redirect("/cluster/nodes/:nodeId/logs", "/node/:nodeId/logs")
        .prefix_redirect("/cluster/events", "/events")
        .exact_redirect("/nodes", "/overview/list")
        // 404
        .not_found("*")
}

/// Raft debug pages, relative to the `/raft` mount. `/raft` itself lands on ranges.
fn raft_routes() -> RouteTableBuilder {
    RouteTable::builder()
        .exact_redirect("/", "/ranges")
        .exact_view("/ranges", RAFT_RANGES)
        .exact_view("/messages/all", RAFT_MESSAGES)
        .exact_view("/messages/node/:nodeId", RAFT_MESSAGES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{RouteKind, DEFAULT_MAX_HOPS};

    #[test]
    fn test_console_table_builds_and_verifies() {
        let table = route_table().unwrap();
        table.verify_redirects(DEFAULT_MAX_HOPS).unwrap();
        assert!(table.unknown_views(&views::ConsoleViews).is_empty());
    }

    #[test]
    fn test_catch_all_is_last() {
        let table = route_table().unwrap();
        let last = table.entries().last().unwrap();
        assert_eq!(last.order(), table.len() - 1);
        assert_eq!(last.kind(), &RouteKind::NotFound);
        assert!(last.pattern().has_wildcard());
    }

    #[test]
    fn test_statement_redirect_precedes_details() {
        let table = route_table().unwrap();
        let order_of = |template: &str| {
            table
                .entries()
                .iter()
                .find(|e| e.pattern().to_string() == template)
                .map(|e| e.order())
                .unwrap()
        };
        assert!(order_of("/statement") < order_of("/statement/:stmt"));
        assert!(order_of("/statement") < order_of("/statement/:txn/:stmt"));
    }
}
