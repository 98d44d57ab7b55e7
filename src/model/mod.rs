mod edge;
mod graph;
mod node;

pub use edge::{DependencyEdge, Edge, EdgeKind, HierarchyEdge, MembershipEdge};
pub use graph::DependencyGraph;
pub use node::{ConstructType, GraphNode, NodeCategory, NodeId, Property};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
