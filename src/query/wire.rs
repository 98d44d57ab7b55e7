//! Wire shapes of the `getdependencyGraph` response and their conversion into
//! a [`DependencyGraph`] snapshot.

use super::FetchError;
use crate::model::{
    DependencyEdge, DependencyGraph, Edge, GraphNode, HierarchyEdge, MembershipEdge, NodeId,
    null_as_default,
};
use serde::{Deserialize, Serialize};

/// Request body sent to the GraphQL endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GraphQlRequest<'a> {
    pub query: &'static str,
    pub operation_name: &'static str,
    pub variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Variables<'a> {
    pub project_id: i64,
    pub version_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<QueryData>,
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryData {
    project_by_id: Option<ProjectById>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectById {
    dependency_graph: Option<RawDependencyGraph>,
}

#[derive(Debug, Deserialize)]
struct NodeRef {
    id: NodeId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDependencyGraph {
    #[serde(default, deserialize_with = "null_as_default")]
    all_units: Vec<GraphNode>,
    #[serde(default, deserialize_with = "null_as_default")]
    all_containers: Vec<GraphNode>,
    #[serde(default, deserialize_with = "null_as_default")]
    membership_edges: Vec<RawMembershipEdge>,
    #[serde(default, deserialize_with = "null_as_default")]
    dependency_edges: Vec<RawDependencyEdge>,
    #[serde(default, deserialize_with = "null_as_default")]
    hierarchy_edges: Vec<RawHierarchyEdge>,
}

#[derive(Debug, Deserialize)]
struct RawMembershipEdge {
    id: NodeId,
    label: String,
    member: NodeRef,
    parent: NodeRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDependencyEdge {
    id: NodeId,
    label: String,
    #[serde(default)]
    weight: Option<i64>,
    depended_upon: NodeRef,
    dependant: NodeRef,
}

#[derive(Debug, Deserialize)]
struct RawHierarchyEdge {
    id: NodeId,
    label: String,
    parent: NodeRef,
    #[serde(default, deserialize_with = "null_as_default")]
    children: Vec<NodeRef>,
}

impl From<RawDependencyGraph> for DependencyGraph {
    fn from(raw: RawDependencyGraph) -> Self {
        let membership = raw.membership_edges.into_iter().map(|e| {
            Edge::Membership(MembershipEdge {
                id: e.id,
                label: e.label,
                member: e.member.id,
                parent: e.parent.id,
            })
        });
        let dependency = raw.dependency_edges.into_iter().map(|e| {
            Edge::Dependency(DependencyEdge {
                id: e.id,
                label: e.label,
                weight: e.weight,
                dependant: e.dependant.id,
                depended_upon: e.depended_upon.id,
            })
        });
        let hierarchy = raw.hierarchy_edges.into_iter().map(|e| {
            Edge::Hierarchy(HierarchyEdge {
                id: e.id,
                label: e.label,
                parent: e.parent.id,
                children: e.children.into_iter().map(|c| c.id).collect(),
            })
        });

        DependencyGraph::new(
            raw.all_units,
            raw.all_containers,
            membership.chain(dependency).chain(hierarchy).collect(),
        )
    }
}

/// Decode a complete GraphQL response body into a snapshot.
///
/// Any reported GraphQL error fails the whole response; partial data is never used.
pub fn parse_response(body: &[u8]) -> Result<DependencyGraph, FetchError> {
    let response: GraphQlResponse = serde_json::from_slice(body)?;

    if !response.errors.is_empty() {
        return Err(FetchError::GraphQl(
            response.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    response
        .data
        .and_then(|d| d.project_by_id)
        .and_then(|p| p.dependency_graph)
        .map(DependencyGraph::from)
        .ok_or(FetchError::MissingData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeKind, NodeCategory};

    const FIXTURE: &str = include_str!("../../tests/fixtures/dependency_graph.json");

    #[test]
    fn test_parse_fixture_tags_edges_by_collection() {
        let graph = parse_response(FIXTURE.as_bytes()).unwrap();

        assert_eq!(graph.units().len(), 3);
        assert_eq!(graph.containers().len(), 2);
        assert!(graph.units().iter().all(|n| n.category == NodeCategory::Unit));

        let count = |kind: EdgeKind| graph.edges().iter().filter(|e| e.kind() == kind).count();
        assert_eq!(count(EdgeKind::Membership), 3);
        assert_eq!(count(EdgeKind::Dependency), 5);
        assert_eq!(count(EdgeKind::Hierarchy), 3);

        let null_weight = graph
            .dependency_edges()
            .find(|e| e.id.as_str() == "204")
            .unwrap();
        assert_eq!(null_weight.weight, None);

        let h = graph.hierarchy_edges().next().unwrap();
        assert_eq!(h.parent.as_str(), "10");
        assert_eq!(h.children, vec![NodeId::from("1"), NodeId::from("2")]);
    }

    #[test]
    fn test_graphql_errors_fail_the_response() {
        let body = br#"{"data": null, "errors": [{"message": "Project 9 not found"}]}"#;
        match parse_response(body) {
            Err(FetchError::GraphQl(messages)) => {
                assert_eq!(messages, vec!["Project 9 not found".to_string()]);
            }
            other => panic!("expected GraphQl error, got {:?}", other),
        }
    }

    #[test]
    fn test_errors_win_over_partial_data() {
        let body = br#"{
            "data": {"projectById": {"dependencyGraph": {"allUnits": []}}},
            "errors": [{"message": "hierarchyEdges resolver failed"}]
        }"#;
        assert!(matches!(parse_response(body), Err(FetchError::GraphQl(_))));
    }

    #[test]
    fn test_null_project_is_missing_data() {
        let body = br#"{"data": {"projectById": null}}"#;
        assert!(matches!(parse_response(body), Err(FetchError::MissingData)));

        let body = br#"{"data": {"projectById": {"dependencyGraph": null}}}"#;
        assert!(matches!(parse_response(body), Err(FetchError::MissingData)));
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        assert!(matches!(
            parse_response(b"<html>502 Bad Gateway</html>"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn test_request_body_uses_camel_case_variables() {
        let request = GraphQlRequest {
            query: crate::query::DEPENDENCY_GRAPH_QUERY,
            operation_name: "getdependencyGraph",
            variables: Variables {
                project_id: 287,
                version_id: "abc123",
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["operationName"], "getdependencyGraph");
        assert_eq!(value["variables"]["projectId"], 287);
        assert_eq!(value["variables"]["versionId"], "abc123");
    }
}
