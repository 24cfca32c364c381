//! Parameterized pattern inventory for analytics redaction.
//!
//! The analytics layer scrubs identifying values out of reported paths. It
//! needs to know, for every route that captures parameters, which segments
//! are literals and which are values that may identify a user.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::routing::matcher::Segment;
use crate::routing::router::{RouteEntry, RouteTable};

/// Parameter names whose values are personally identifying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveParams {
    names: BTreeSet<String>,
}

impl SensitiveParams {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl Default for SensitiveParams {
    /// Database and table names. Node and range ids are serial, not identifying.
    fn default() -> Self {
        Self::new(["db", "tbl"])
    }
}

/// One captured parameter of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamInfo {
    pub name: String,
    /// Zero-based segment index within the full template.
    pub position: usize,
    pub sensitive: bool,
}

/// A route that captures at least one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternInfo {
    /// Full template, mount prefixes included.
    pub template: String,
    pub params: Vec<ParamInfo>,
}

impl PatternInfo {
    pub fn is_sensitive(&self) -> bool {
        self.params.iter().any(|p| p.sensitive)
    }
}

/// Every parameterized pattern of a table tree, in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PatternInventory {
    patterns: Vec<PatternInfo>,
}

impl PatternInventory {
    pub fn patterns(&self) -> &[PatternInfo] {
        &self.patterns
    }

    pub fn sensitive(&self) -> impl Iterator<Item = &PatternInfo> {
        self.patterns.iter().filter(|p| p.is_sensitive())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl RouteTable {
    /// List every pattern that binds parameters, classified by `sensitive`.
    pub fn inventory(&self, sensitive: &SensitiveParams) -> PatternInventory {
        let mut patterns = Vec::new();
        self.visit("", &mut |prefix: &str, entry: &RouteEntry| {
            let offset = prefix.split('/').filter(|s| !s.is_empty()).count();
            let params: Vec<ParamInfo> = entry
                .pattern()
                .segments()
                .iter()
                .enumerate()
                .filter_map(|(i, segment)| match segment {
                    Segment::Param(name) => Some(ParamInfo {
                        name: name.clone(),
                        position: offset + i,
                        sensitive: sensitive.contains(name),
                    }),
                    _ => None,
                })
                .collect();

            if !params.is_empty() {
                patterns.push(PatternInfo {
                    template: format!("{}{}", prefix, entry.pattern()),
                    params,
                });
            }
        });
        PatternInventory { patterns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::view::ViewId;

    const VIEW: ViewId = ViewId::from_static("View");

    #[test]
    fn test_inventory_classifies_params() {
        let table = RouteTable::builder()
            .exact_view("/", VIEW)
            .prefix_view("/database/:db/table/:tbl", VIEW)
            .exact_view("/node/:nodeId", VIEW)
            .build()
            .unwrap();

        let inventory = table.inventory(&SensitiveParams::default());
        assert_eq!(inventory.len(), 2);

        let tables = &inventory.patterns()[0];
        assert_eq!(tables.template, "/database/:db/table/:tbl");
        assert_eq!(
            tables.params,
            vec![
                ParamInfo { name: "db".into(), position: 1, sensitive: true },
                ParamInfo { name: "tbl".into(), position: 3, sensitive: true },
            ]
        );
        assert!(!inventory.patterns()[1].is_sensitive());
        assert_eq!(inventory.sensitive().count(), 1);
    }

    #[test]
    fn test_inventory_includes_mount_prefix() {
        let table = RouteTable::builder()
            .mount(
                "/raft",
                VIEW,
                RouteTable::builder().exact_view("/messages/node/:nodeId", VIEW),
            )
            .build()
            .unwrap();

        let inventory = table.inventory(&SensitiveParams::new(["nodeId"]));
        let info = &inventory.patterns()[0];
        assert_eq!(info.template, "/raft/messages/node/:nodeId");
        assert_eq!(info.params[0].position, 3);
        assert!(info.params[0].sensitive);
    }
}
