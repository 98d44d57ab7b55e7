//! GraphQL access to the dependency graph of a project version.

mod client;
mod wire;

pub use client::{GraphClient, GraphKey};
pub use wire::parse_response;

use crate::model::DependencyGraph;
use std::sync::Arc;
use thiserror::Error;

pub const OPERATION_NAME: &str = "getdependencyGraph";

pub const DEPENDENCY_GRAPH_QUERY: &str = r#"query getdependencyGraph($projectId: Int!, $versionId: String!) {
  projectById(projectId: $projectId) {
    dependencyGraph(versionId: $versionId) {
      allUnits {
        id
        label
        name
        simpleName
        relativeFilePath
        properties { key value __typename }
        constructType { name prettyName __typename }
        __typename
      }
      allContainers {
        id
        label
        name
        simpleName
        relativeFilePath
        constructType { name prettyName __typename }
        properties { key value __typename }
        __typename
      }
      membershipEdges {
        id
        label
        member { id __typename }
        parent { id __typename }
        __typename
      }
      dependencyEdges {
        id
        label
        weight
        dependedUpon { id __typename }
        dependant { id __typename }
        __typename
      }
      hierarchyEdges {
        id
        label
        parent { id __typename }
        children { id __typename }
        __typename
      }
      __typename
    }
    __typename
  }
}"#;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint answered with HTTP {0}")]
    Status(u16),
    #[error("query returned errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),
    #[error("response contained no dependency graph")]
    MissingData,
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Progress of the single graph request a view depends on.
#[derive(Debug, Clone, Default)]
pub enum FetchState {
    #[default]
    Loading,
    Failed(String),
    Ready(Arc<DependencyGraph>),
}

impl FetchState {
    pub fn status(&self) -> &'static str {
        match self {
            FetchState::Loading => "loading",
            FetchState::Failed(_) => "error",
            FetchState::Ready(_) => "ready",
        }
    }

    pub fn graph(&self) -> Option<&Arc<DependencyGraph>> {
        match self {
            FetchState::Ready(graph) => Some(graph),
            _ => None,
        }
    }
}

impl From<Result<Arc<DependencyGraph>, FetchError>> for FetchState {
    fn from(result: Result<Arc<DependencyGraph>, FetchError>) -> Self {
        match result {
            Ok(graph) => FetchState::Ready(graph),
            Err(e) => FetchState::Failed(e.to_string()),
        }
    }
}
