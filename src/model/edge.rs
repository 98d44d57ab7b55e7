use super::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three relations the dependency graph carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Membership,
    Dependency,
    Hierarchy,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 3] = [EdgeKind::Membership, EdgeKind::Dependency, EdgeKind::Hierarchy];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Membership => "membership",
            EdgeKind::Dependency => "dependency",
            EdgeKind::Hierarchy => "hierarchy",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An edge of the snapshot. The variant is fixed when the response is parsed,
/// from the collection the edge was listed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Edge {
    Membership(MembershipEdge),
    Dependency(DependencyEdge),
    Hierarchy(HierarchyEdge),
}

/// `member` is contained in `parent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipEdge {
    pub id: NodeId,
    pub label: String,
    pub member: NodeId,
    pub parent: NodeId,
}

/// `dependant` depends on `depended_upon`, `weight` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub id: NodeId,
    pub label: String,
    pub weight: Option<i64>,
    pub dependant: NodeId,
    pub depended_upon: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyEdge {
    pub id: NodeId,
    pub label: String,
    pub parent: NodeId,
    pub children: Vec<NodeId>,
}

impl Edge {
    pub fn kind(&self) -> EdgeKind {
        match self {
            Edge::Membership(_) => EdgeKind::Membership,
            Edge::Dependency(_) => EdgeKind::Dependency,
            Edge::Hierarchy(_) => EdgeKind::Hierarchy,
        }
    }

    pub fn id(&self) -> &NodeId {
        match self {
            Edge::Membership(e) => &e.id,
            Edge::Dependency(e) => &e.id,
            Edge::Hierarchy(e) => &e.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Edge::Membership(e) => &e.label,
            Edge::Dependency(e) => &e.label,
            Edge::Hierarchy(e) => &e.label,
        }
    }

    /// Every node id this edge touches, source side first.
    pub fn endpoints(&self) -> Vec<&NodeId> {
        match self {
            Edge::Membership(e) => vec![&e.member, &e.parent],
            Edge::Dependency(e) => vec![&e.dependant, &e.depended_upon],
            Edge::Hierarchy(e) => std::iter::once(&e.parent).chain(e.children.iter()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_serializes_with_kind_tag() {
        let edge = Edge::Dependency(DependencyEdge {
            id: NodeId::from("d1"),
            label: "depends_on".into(),
            weight: Some(4),
            dependant: NodeId::from("1"),
            depended_upon: NodeId::from("2"),
        });

        let value = serde_json::to_value(&edge).unwrap();
        assert_eq!(value["kind"], "dependency");
        assert_eq!(value["weight"], 4);

        let back: Edge = serde_json::from_value(value).unwrap();
        assert_eq!(back.kind(), EdgeKind::Dependency);
    }

    #[test]
    fn test_hierarchy_endpoints_include_every_child() {
        let edge = Edge::Hierarchy(HierarchyEdge {
            id: NodeId::from("h1"),
            label: "child_of".into(),
            parent: NodeId::from("p"),
            children: vec![NodeId::from("c1"), NodeId::from("c2")],
        });

        let ends: Vec<&str> = edge.endpoints().iter().map(|id| id.as_str()).collect();
        assert_eq!(ends, vec!["p", "c1", "c2"]);
    }
}
