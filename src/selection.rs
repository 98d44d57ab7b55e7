//! User selections that drive a view: which node categories to keep and which
//! edge kind to highlight.

use crate::model::{EdgeKind, NodeCategory};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSelectionError {
    #[error("unknown node filter '{0}' (expected all, unit or container)")]
    Filter(String),
    #[error("unknown edge highlight '{0}' (expected none, membership, dependency or hierarchy)")]
    Highlight(String),
}

/// Node-category filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeFilter {
    #[default]
    All,
    Unit,
    Container,
}

impl NodeFilter {
    pub fn matches(&self, category: &NodeCategory) -> bool {
        match self {
            NodeFilter::All => true,
            NodeFilter::Unit => *category == NodeCategory::Unit,
            NodeFilter::Container => *category == NodeCategory::Container,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeFilter::All => "all",
            NodeFilter::Unit => "unit",
            NodeFilter::Container => "container",
        }
    }
}

impl FromStr for NodeFilter {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(NodeFilter::All),
            "unit" => Ok(NodeFilter::Unit),
            "container" => Ok(NodeFilter::Container),
            _ => Err(ParseSelectionError::Filter(s.to_string())),
        }
    }
}

impl fmt::Display for NodeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge kind whose edges are drawn emphasized, or none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeHighlight {
    #[default]
    None,
    Membership,
    Dependency,
    Hierarchy,
}

impl EdgeHighlight {
    pub fn kind(&self) -> Option<EdgeKind> {
        match self {
            EdgeHighlight::None => None,
            EdgeHighlight::Membership => Some(EdgeKind::Membership),
            EdgeHighlight::Dependency => Some(EdgeKind::Dependency),
            EdgeHighlight::Hierarchy => Some(EdgeKind::Hierarchy),
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.kind().map_or("none", |k| k.as_str())
    }
}

impl From<EdgeKind> for EdgeHighlight {
    fn from(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Membership => EdgeHighlight::Membership,
            EdgeKind::Dependency => EdgeHighlight::Dependency,
            EdgeKind::Hierarchy => EdgeHighlight::Hierarchy,
        }
    }
}

impl FromStr for EdgeHighlight {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(EdgeHighlight::None),
            "membership" => Ok(EdgeHighlight::Membership),
            "dependency" => Ok(EdgeHighlight::Dependency),
            "hierarchy" => Ok(EdgeHighlight::Hierarchy),
            _ => Err(ParseSelectionError::Highlight(s.to_string())),
        }
    }
}

impl fmt::Display for EdgeHighlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
