//! Opaque view handles.
//!
//! The resolver never looks inside a view; it only hands the identifier
//! (and the captured parameters) back to the rendering layer.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;

use crate::routing::params::ParameterSet;

/// Identifier of a view factory supplied by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ViewId(Cow<'static, str>);

impl ViewId {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A view plus the parameters to construct it with.
///
/// Produced per resolution and owned by the caller; never stored in a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewBinding {
    pub view: ViewId,
    pub params: ParameterSet,
}

/// The set of views the rendering layer can actually build.
pub trait ViewRegistry {
    fn contains(&self, view: &ViewId) -> bool;
}

impl ViewRegistry for HashSet<ViewId> {
    fn contains(&self, view: &ViewId) -> bool {
        HashSet::contains(self, view)
    }
}

impl ViewRegistry for BTreeSet<ViewId> {
    fn contains(&self, view: &ViewId) -> bool {
        BTreeSet::contains(self, view)
    }
}

impl ViewRegistry for Vec<ViewId> {
    fn contains(&self, view: &ViewId) -> bool {
        self.iter().any(|v| v == view)
    }
}

impl<const N: usize> ViewRegistry for [ViewId; N] {
    fn contains(&self, view: &ViewId) -> bool {
        self.iter().any(|v| v == view)
    }
}
