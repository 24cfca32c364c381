//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile a template (`/metrics/:dashboard/node/:nodeId`, `*`) into segments
//! - Match a candidate path segment by segment, binding parameters
//! - Report the unconsumed remainder for prefix (non-exact) patterns
//!
//! # Design Decisions
//! - Literal comparison is case-sensitive
//! - Empty segments are ignored, so `/a//b/` and `/a/b` are the same candidate
//! - A wildcard is only legal as the final segment and matches zero or more segments
//! - No regex: matching is a single linear walk over the segments

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::routing::params::{ParameterSet, WILDCARD_KEY};

/// Errors raised while compiling a path template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("parameter `{name}` appears more than once in `{template}`")]
    DuplicateParam { template: String, name: String },

    #[error("wildcard must be the last segment in `{template}`")]
    NonTrailingWildcard { template: String },

    #[error("parameter segment without a name in `{template}`")]
    EmptyParamName { template: String },

    #[error("parameter name `{name}` is reserved in `{template}`")]
    ReservedParamName { template: String, name: String },

    #[error("query or fragment in `{template}`; patterns match the path only")]
    QueryInTemplate { template: String },
}

/// One `/`-delimited piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches identical text only.
    Literal(String),
    /// Matches any single segment and binds it to the name.
    Param(String),
    /// Matches all remaining segments.
    Wildcard,
}

impl Segment {
    pub fn is_param(&self) -> bool {
        matches!(self, Segment::Param(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Param(name) => write!(f, ":{}", name),
            Segment::Wildcard => f.write_str("*"),
        }
    }
}

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Parameters bound by the pattern.
    pub params: ParameterSet,
    /// Segments the pattern did not consume, re-joined. `/` when nothing is left.
    pub remainder: String,
}

/// A compiled path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
    exact: bool,
}

impl PathPattern {
    /// Compile `template`.
    ///
    /// With `exact` unset the pattern also matches any longer path, leaving
    /// the extra segments as the match remainder.
    pub fn parse(template: &str, exact: bool) -> Result<Self, PatternError> {
        if template.contains(|c: char| c == '?' || c == '#') {
            return Err(PatternError::QueryInTemplate {
                template: template.to_string(),
            });
        }

        let raw: Vec<&str> = path_segments(template).collect();
        let mut segments = Vec::with_capacity(raw.len());
        let mut seen = HashSet::new();

        for (i, part) in raw.iter().enumerate() {
            let segment = if *part == "*" {
                if i + 1 != raw.len() {
                    return Err(PatternError::NonTrailingWildcard {
                        template: template.to_string(),
                    });
                }
                Segment::Wildcard
            } else if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(PatternError::EmptyParamName {
                        template: template.to_string(),
                    });
                }
                if name == WILDCARD_KEY {
                    return Err(PatternError::ReservedParamName {
                        template: template.to_string(),
                        name: name.to_string(),
                    });
                }
                if !seen.insert(name) {
                    return Err(PatternError::DuplicateParam {
                        template: template.to_string(),
                        name: name.to_string(),
                    });
                }
                Segment::Param(name.to_string())
            } else {
                Segment::Literal(part.to_string())
            };
            segments.push(segment);
        }

        Ok(Self { segments, exact })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn has_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard))
    }

    /// Names of the `Param` segments, in template order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Same segments, prefix semantics.
    pub(crate) fn into_prefix(mut self) -> Self {
        self.exact = false;
        self
    }

    /// Match `path` (without query or fragment) against this pattern.
    pub fn matches(&self, path: &str) -> Option<PatternMatch> {
        let candidate: Vec<&str> = path_segments(path).collect();
        let mut params = ParameterSet::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(text) => {
                    if *candidate.get(i)? != text.as_str() {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.as_str(), *candidate.get(i)?);
                }
                Segment::Wildcard => {
                    params.insert(WILDCARD_KEY, candidate[i..].join("/"));
                    return Some(PatternMatch {
                        params,
                        remainder: "/".to_string(),
                    });
                }
            }
        }

        let consumed = self.segments.len();
        if self.exact && candidate.len() != consumed {
            return None;
        }

        Some(PatternMatch {
            params,
            remainder: join_path(&candidate[consumed..]),
        })
    }

    /// Substitute `params` into this pattern, producing a concrete path.
    ///
    /// Callers guarantee every `Param` is bound; an unbound name renders as
    /// an empty segment and is dropped.
    pub(crate) fn render(&self, params: &ParameterSet) -> String {
        let parts: Vec<&str> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Param(name) => params.get(name).unwrap_or_default(),
                Segment::Wildcard => params.wildcard().unwrap_or_default(),
            })
            .collect();
        // A wildcard value may itself contain `/`; re-split to normalize.
        let joined = parts.join("/");
        join_path(&path_segments(&joined).collect::<Vec<_>>())
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Non-empty `/`-delimited segments of `path`.
pub(crate) fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Split `path` into the routable part and the query/fragment suffix.
pub(crate) fn split_suffix(path: &str) -> (&str, &str) {
    match path.find(|c: char| c == '?' || c == '#') {
        Some(idx) => path.split_at(idx),
        None => (path, ""),
    }
}

/// Canonical form of `path`: leading slash, no empty segments.
pub fn normalize(path: &str) -> String {
    join_path(&path_segments(path).collect::<Vec<_>>())
}

/// The part of `path` a prefix match consumed, given what it left over.
pub(crate) fn consumed_prefix(path: &str, remainder: &str) -> String {
    let segments: Vec<&str> = path_segments(path).collect();
    let keep = segments.len().saturating_sub(path_segments(remainder).count());
    join_path(&segments[..keep])
}

/// `path` (relative to a mount) re-expressed under the mount's `prefix`.
pub(crate) fn join_under(prefix: &str, path: &str) -> String {
    normalize(&format!("{}/{}", prefix, path))
}

fn join_path(segments: &[&str]) -> String {
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let pattern = PathPattern::parse("/metrics/:dashboard/node/:nodeId", true).unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("metrics".into()),
                Segment::Param("dashboard".into()),
                Segment::Literal("node".into()),
                Segment::Param("nodeId".into()),
            ]
        );
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["dashboard", "nodeId"]);
        assert_eq!(pattern.to_string(), "/metrics/:dashboard/node/:nodeId");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            PathPattern::parse("/a/:id/b/:id", true),
            Err(PatternError::DuplicateParam { name, .. }) if name == "id"
        ));
        assert!(matches!(
            PathPattern::parse("/a/*/b", false),
            Err(PatternError::NonTrailingWildcard { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/a/:", true),
            Err(PatternError::EmptyParamName { .. })
        ));
    }

    #[test]
    fn test_wildcard_key_not_a_param_name() {
        assert!(matches!(
            PathPattern::parse("/a/:*/*", false),
            Err(PatternError::ReservedParamName { name, .. }) if name == "*"
        ));
    }

    #[test]
    fn test_query_and_fragment_rejected() {
        for template in ["/new?tab=1", "/new#top", "/a/:id?x"] {
            assert!(matches!(
                PathPattern::parse(template, true),
                Err(PatternError::QueryInTemplate { .. })
            ));
        }
    }

    #[test]
    fn test_exact_match() {
        let pattern = PathPattern::parse("/node/:nodeId", true).unwrap();

        let m = pattern.matches("/node/3").unwrap();
        assert_eq!(m.params.get("nodeId"), Some("3"));
        assert_eq!(m.remainder, "/");

        assert!(pattern.matches("/node/3/logs").is_none());
        assert!(pattern.matches("/node").is_none());
        assert!(pattern.matches("/nodes/3").is_none());
    }

    #[test]
    fn test_prefix_match_leaves_remainder() {
        let pattern = PathPattern::parse("/raft", false).unwrap();

        assert_eq!(pattern.matches("/raft").unwrap().remainder, "/");
        assert_eq!(
            pattern.matches("/raft/messages/node/2").unwrap().remainder,
            "/messages/node/2"
        );
        // Prefix matching stops at segment boundaries.
        assert!(pattern.matches("/rafts").is_none());
    }

    #[test]
    fn test_empty_segments_ignored() {
        let pattern = PathPattern::parse("/databases/tables", true).unwrap();
        assert!(pattern.matches("//databases///tables/").is_some());
    }

    #[test]
    fn test_root_pattern() {
        let exact = PathPattern::parse("/", true).unwrap();
        assert!(exact.matches("/").is_some());
        assert!(exact.matches("").is_some());
        assert!(exact.matches("/overview").is_none());

        let prefix = PathPattern::parse("/", false).unwrap();
        assert_eq!(prefix.matches("/overview").unwrap().remainder, "/overview");
    }

    #[test]
    fn test_wildcard_binds_rest() {
        let pattern = PathPattern::parse("/files/*", false).unwrap();
        let m = pattern.matches("/files/a/b/c").unwrap();
        assert_eq!(m.params.wildcard(), Some("a/b/c"));

        let catch_all = PathPattern::parse("*", false).unwrap();
        assert_eq!(catch_all.matches("/").unwrap().params.wildcard(), Some(""));
        assert!(catch_all.matches("/totally/unknown/path").is_some());
    }

    #[test]
    fn test_render() {
        let template = PathPattern::parse("/metrics/:dashboard/node/:nodeId", true).unwrap();
        let params: ParameterSet = [("dashboard", "overview"), ("nodeId", "4")]
            .into_iter()
            .collect();
        assert_eq!(template.render(&params), "/metrics/overview/node/4");

        let root = PathPattern::parse("/", true).unwrap();
        assert_eq!(root.render(&ParameterSet::new()), "/");

        let wild = PathPattern::parse("/archive/*", false).unwrap();
        let params: ParameterSet = [(WILDCARD_KEY, "2019/jan")].into_iter().collect();
        assert_eq!(wild.render(&params), "/archive/2019/jan");
    }

    #[test]
    fn test_mount_prefix_helpers() {
        assert_eq!(consumed_prefix("/raft/messages/all", "/messages/all"), "/raft");
        assert_eq!(consumed_prefix("/raft", "/"), "/raft");
        assert_eq!(join_under("/raft", "/ranges"), "/raft/ranges");
        assert_eq!(join_under("/raft", "/"), "/raft");
        assert_eq!(join_under("/", "/a"), "/a");
    }

    #[test]
    fn test_split_suffix() {
        assert_eq!(split_suffix("/statements?app=x"), ("/statements", "?app=x"));
        assert_eq!(split_suffix("/events#top"), ("/events", "#top"));
        assert_eq!(split_suffix("/jobs"), ("/jobs", ""));
    }
}
