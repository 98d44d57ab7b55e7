//! Flattening of a [`DependencyGraph`] snapshot into Cytoscape elements.
//!
//! [`build_elements`] is pure: the same snapshot, filter and options always
//! produce the same elements, and no produced edge ever points at a node that
//! was filtered out.

use crate::model::{DependencyGraph, Edge, EdgeKind, GraphNode, NodeCategory, NodeId};
use crate::selection::NodeFilter;
use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};

/// Padding every node gets before incoming weight is added.
pub const BASE_NODE_PADDING: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Grow node padding with the summed weight of incoming dependencies.
    pub weighted_padding: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            weighted_padding: true,
        }
    }
}

/// Nodes followed by edges. Serializes as one flat array, the shape the
/// Cytoscape `elements` option takes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Elements {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisNode {
    pub data: VisNodeData,
    pub classes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisNodeData {
    pub id: String,
    pub label: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisEdge {
    pub data: VisEdgeData,
    pub classes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisEdgeData {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub width: f64,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementSummary {
    pub nodes: usize,
    pub units: usize,
    pub containers: usize,
    pub edges: usize,
    pub membership_edges: usize,
    pub dependency_edges: usize,
    pub hierarchy_edges: usize,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ElementRef<'a> {
    Node(&'a VisNode),
    Edge(&'a VisEdge),
}

impl Serialize for Elements {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.nodes
                .iter()
                .map(ElementRef::Node)
                .chain(self.edges.iter().map(ElementRef::Edge)),
        )
    }
}

impl Elements {
    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.data.id.as_str()).collect()
    }

    pub fn summary(&self) -> ElementSummary {
        let count_nodes = |class: &str| self.nodes.iter().filter(|n| n.classes == class).count();
        let count_edges =
            |kind: EdgeKind| self.edges.iter().filter(|e| e.data.kind == kind).count();

        ElementSummary {
            nodes: self.nodes.len(),
            units: count_nodes(NodeCategory::Unit.as_str()),
            containers: count_nodes(NodeCategory::Container.as_str()),
            edges: self.edges.len(),
            membership_edges: count_edges(EdgeKind::Membership),
            dependency_edges: count_edges(EdgeKind::Dependency),
            hierarchy_edges: count_edges(EdgeKind::Hierarchy),
        }
    }
}

pub fn node_element_id(id: &NodeId) -> String {
    format!("node-{}", id)
}

/// Dependency edge width: `max(1, weight / 5)`. A missing weight draws at 1.
pub fn edge_width(weight: Option<i64>) -> f64 {
    weight.map_or(1.0, |w| (w as f64 / 5.0).max(1.0))
}

/// Node padding for a summed incoming dependency weight.
pub fn node_padding(incoming_weight: i64) -> u32 {
    let extra = u32::try_from(incoming_weight.max(0) / 5).unwrap_or(u32::MAX - BASE_NODE_PADDING);
    BASE_NODE_PADDING.saturating_add(extra)
}

pub fn build_elements(
    graph: &DependencyGraph,
    filter: NodeFilter,
    options: &TransformOptions,
) -> Elements {
    let retained: Vec<&GraphNode> = graph
        .nodes()
        .filter(|node| filter.matches(&node.category))
        .collect();
    let ids: HashSet<&NodeId> = retained.iter().map(|node| &node.id).collect();

    let incoming: Option<HashMap<&NodeId, i64>> = options
        .weighted_padding
        .then(|| graph.incoming_weights(|dependant| ids.contains(dependant)));

    let nodes = retained
        .iter()
        .map(|node| VisNode {
            data: VisNodeData {
                id: node_element_id(&node.id),
                label: node.category.as_str().to_string(),
                name: node.simple_name.clone(),
                padding: incoming
                    .as_ref()
                    .map(|weights| node_padding(weights.get(&node.id).copied().unwrap_or(0))),
            },
            classes: node.category.as_str().to_string(),
        })
        .collect();

    let mut edges = Vec::new();
    for edge in graph.edges() {
        match edge {
            Edge::Membership(e) => {
                if ids.contains(&e.member) && ids.contains(&e.parent) {
                    edges.push(vis_edge(
                        format!("edge-{}", e.id),
                        &e.member,
                        &e.parent,
                        &e.label,
                        1.0,
                        EdgeKind::Membership,
                    ));
                }
            }
            Edge::Dependency(e) => {
                if ids.contains(&e.dependant) && ids.contains(&e.depended_upon) {
                    edges.push(vis_edge(
                        format!("edge-{}", e.id),
                        &e.dependant,
                        &e.depended_upon,
                        &e.label,
                        edge_width(e.weight),
                        EdgeKind::Dependency,
                    ));
                }
            }
            Edge::Hierarchy(e) => {
                if !ids.contains(&e.parent) {
                    continue;
                }
                let mut seen = HashSet::new();
                for child in e
                    .children
                    .iter()
                    .filter(|c| ids.contains(c) && seen.insert(*c))
                {
                    edges.push(vis_edge(
                        format!("edge-{}-to-{}", e.id, child),
                        &e.parent,
                        child,
                        &e.label,
                        1.0,
                        EdgeKind::Hierarchy,
                    ));
                }
            }
        }
    }

    Elements { nodes, edges }
}

fn vis_edge(
    id: String,
    source: &NodeId,
    target: &NodeId,
    label: &str,
    width: f64,
    kind: EdgeKind,
) -> VisEdge {
    VisEdge {
        data: VisEdgeData {
            id,
            source: node_element_id(source),
            target: node_element_id(target),
            label: label.to_string(),
            width,
            kind,
        },
        classes: kind.as_str().to_string(),
    }
}
