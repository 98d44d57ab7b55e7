use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a node or edge within one graph snapshot.
///
/// The GraphQL schema serves ids as integers, but some deployments send them
/// as strings, so both are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => NodeId(n.to_string()),
            RawId::Text(s) => NodeId(s),
        })
    }
}

/// Category of a graph node, taken from the `label` field of the response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeCategory {
    Unit,
    Container,
    Other(String),
}

impl NodeCategory {
    pub fn from_label(label: &str) -> Self {
        match label {
            "unit" => NodeCategory::Unit,
            "container" => NodeCategory::Container,
            other => NodeCategory::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeCategory::Unit => "unit",
            NodeCategory::Container => "container",
            NodeCategory::Other(label) => label,
        }
    }
}

impl From<String> for NodeCategory {
    fn from(label: String) -> Self {
        NodeCategory::from_label(&label)
    }
}

impl From<NodeCategory> for String {
    fn from(category: NodeCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit or container of the dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: NodeId,
    #[serde(rename = "label")]
    pub category: NodeCategory,
    pub name: String,
    pub simple_name: String,
    #[serde(default)]
    pub relative_file_path: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub construct_type: Option<ConstructType>,
}

impl GraphNode {
    /// Look up a property value by key.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: String,
}

/// Language construct a node stands for (e.g. class, package, file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructType {
    pub name: String,
    pub pretty_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_accepts_numbers_and_strings() {
        let ids: Vec<NodeId> = serde_json::from_str(r#"[42, "42", "abc"]"#).unwrap();
        assert_eq!(ids[0], NodeId::from("42"));
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[2].as_str(), "abc");
    }

    #[test]
    fn test_category_from_label() {
        assert_eq!(NodeCategory::from_label("unit"), NodeCategory::Unit);
        assert_eq!(NodeCategory::from_label("container"), NodeCategory::Container);
        assert_eq!(
            NodeCategory::from_label("package"),
            NodeCategory::Other("package".to_string())
        );
        assert_eq!(NodeCategory::Other("package".into()).as_str(), "package");
    }

    #[test]
    fn test_node_deserializes_wire_shape() {
        let json = r#"{
            "id": 7,
            "label": "unit",
            "name": "com.example.Foo",
            "simpleName": "Foo",
            "relativeFilePath": "src/Foo.java",
            "properties": [{"key": "loc", "value": "120", "__typename": "KeyValuePair"}],
            "constructType": {"name": "CLASS", "prettyName": "Class", "__typename": "ConstructType"},
            "__typename": "Unit"
        }"#;

        let node: GraphNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.id.as_str(), "7");
        assert_eq!(node.category, NodeCategory::Unit);
        assert_eq!(node.simple_name, "Foo");
        assert_eq!(node.property("loc"), Some("120"));
        assert_eq!(node.construct_type.unwrap().pretty_name, "Class");
    }

    #[test]
    fn test_node_tolerates_null_properties() {
        let json = r#"{"id": "c1", "label": "container", "name": "pkg", "simpleName": "pkg", "properties": null}"#;
        let node: GraphNode = serde_json::from_str(json).unwrap();
        assert!(node.properties.is_empty());
        assert!(node.relative_file_path.is_none());
    }
}
