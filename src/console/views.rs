//! View identifiers of the admin console.

use crate::routing::{ViewId, ViewRegistry};

pub const LOGIN: ViewId = ViewId::from_static("Login");
pub const LOGOUT: ViewId = ViewId::from_static("Logout");
pub const NODE_LIST: ViewId = ViewId::from_static("NodeList");
pub const CLUSTER_MAP: ViewId = ViewId::from_static("ClusterMap");
pub const NODE_GRAPHS: ViewId = ViewId::from_static("NodeGraphs");
pub const NODE_OVERVIEW: ViewId = ViewId::from_static("NodeOverview");
pub const NODE_LOGS: ViewId = ViewId::from_static("NodeLogs");
pub const EVENTS: ViewId = ViewId::from_static("EventPage");
pub const JOBS: ViewId = ViewId::from_static("JobsPage");
pub const DATABASE_TABLES: ViewId = ViewId::from_static("DatabaseTablesList");
pub const DATABASE_GRANTS: ViewId = ViewId::from_static("DatabaseGrantsList");
pub const TABLE_DETAILS: ViewId = ViewId::from_static("TableDetails");
pub const DATA_DISTRIBUTION: ViewId = ViewId::from_static("DataDistributionPage");
pub const STATEMENTS: ViewId = ViewId::from_static("StatementsPage");
pub const STATEMENT_DETAILS: ViewId = ViewId::from_static("StatementDetails");
pub const DEBUG: ViewId = ViewId::from_static("Debug");
pub const REDUX_DEBUG: ViewId = ViewId::from_static("ReduxDebug");
pub const CUSTOM_CHART: ViewId = ViewId::from_static("CustomChart");
pub const ENQUEUE_RANGE: ViewId = ViewId::from_static("EnqueueRange");
pub const RAFT: ViewId = ViewId::from_static("Raft");
pub const RAFT_RANGES: ViewId = ViewId::from_static("RaftRanges");
pub const RAFT_MESSAGES: ViewId = ViewId::from_static("RaftMessages");
pub const PROBLEM_RANGES: ViewId = ViewId::from_static("ProblemRanges");
pub const LOCALITIES: ViewId = ViewId::from_static("Localities");
pub const NETWORK: ViewId = ViewId::from_static("Network");
pub const NODES_REPORT: ViewId = ViewId::from_static("Nodes");
pub const DECOMMISSIONED_HISTORY: ViewId = ViewId::from_static("DecommissionedNodeHistory");
pub const SETTINGS: ViewId = ViewId::from_static("Settings");
pub const CERTIFICATES: ViewId = ViewId::from_static("Certificates");
pub const RANGE: ViewId = ViewId::from_static("Range");
pub const STORES: ViewId = ViewId::from_static("Stores");

/// Every view the console renderer provides.
pub const ALL: &[ViewId] = &[
    LOGIN,
    LOGOUT,
    NODE_LIST,
    CLUSTER_MAP,
    NODE_GRAPHS,
    NODE_OVERVIEW,
    NODE_LOGS,
    EVENTS,
    JOBS,
    DATABASE_TABLES,
    DATABASE_GRANTS,
    TABLE_DETAILS,
    DATA_DISTRIBUTION,
    STATEMENTS,
    STATEMENT_DETAILS,
    DEBUG,
    REDUX_DEBUG,
    CUSTOM_CHART,
    ENQUEUE_RANGE,
    RAFT,
    RAFT_RANGES,
    RAFT_MESSAGES,
    PROBLEM_RANGES,
    LOCALITIES,
    NETWORK,
    NODES_REPORT,
    DECOMMISSIONED_HISTORY,
    SETTINGS,
    CERTIFICATES,
    RANGE,
    STORES,
];

/// Registry backed by [`ALL`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleViews;

impl ViewRegistry for ConsoleViews {
    fn contains(&self, view: &ViewId) -> bool {
        ALL.contains(view)
    }
}
