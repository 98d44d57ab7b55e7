use super::{DependencyEdge, Edge, GraphNode, HierarchyEdge, MembershipEdge, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One fetched project version: every unit, container and edge.
///
/// A snapshot is never mutated after it is built. Views filter and derive from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyGraph {
    units: Vec<GraphNode>,
    containers: Vec<GraphNode>,
    edges: Vec<Edge>,
}

impl DependencyGraph {
    /// Build a snapshot. Edges are reordered so membership edges come first,
    /// then dependency edges, then hierarchy edges, each group keeping its
    /// original order.
    pub fn new(units: Vec<GraphNode>, containers: Vec<GraphNode>, mut edges: Vec<Edge>) -> Self {
        edges.sort_by_key(|e| e.kind());
        Self {
            units,
            containers,
            edges,
        }
    }

    pub fn units(&self) -> &[GraphNode] {
        &self.units
    }

    pub fn containers(&self) -> &[GraphNode] {
        &self.containers
    }

    /// Units followed by containers.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.units.iter().chain(self.containers.iter())
    }

    pub fn node_count(&self) -> usize {
        self.units.len() + self.containers.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn membership_edges(&self) -> impl Iterator<Item = &MembershipEdge> {
        self.edges.iter().filter_map(|e| match e {
            Edge::Membership(m) => Some(m),
            _ => None,
        })
    }

    pub fn dependency_edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.edges.iter().filter_map(|e| match e {
            Edge::Dependency(d) => Some(d),
            _ => None,
        })
    }

    pub fn hierarchy_edges(&self) -> impl Iterator<Item = &HierarchyEdge> {
        self.edges.iter().filter_map(|e| match e {
            Edge::Hierarchy(h) => Some(h),
            _ => None,
        })
    }

    /// Sum of incoming dependency weights per depended-upon node, counting only
    /// edges whose dependant passes `include`. Edges without a weight count as 0.
    pub fn incoming_weights<F>(&self, include: F) -> HashMap<&NodeId, i64>
    where
        F: Fn(&NodeId) -> bool,
    {
        let mut weights: HashMap<&NodeId, i64> = HashMap::new();
        for edge in self.dependency_edges() {
            if !include(&edge.dependant) {
                continue;
            }
            *weights.entry(&edge.depended_upon).or_insert(0) += edge.weight.unwrap_or(0);
        }
        weights
    }
}
