use super::wire::{GraphQlRequest, Variables, parse_response};
use super::{DEPENDENCY_GRAPH_QUERY, FetchError, OPERATION_NAME};
use crate::model::DependencyGraph;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Cache key: one entry per project version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphKey {
    pub project_id: i64,
    pub version_id: String,
}

/// Client for the dependency-graph GraphQL endpoint.
///
/// Snapshots are cached in memory per [`GraphKey`]; asking again for the same
/// project version returns the cached snapshot without a request. Failed
/// requests are not cached and are never retried.
pub struct GraphClient {
    http: Client,
    endpoint: String,
    cache: RwLock<HashMap<GraphKey, Arc<DependencyGraph>>>,
}

impl GraphClient {
    /// `timeout` of `None` lets a request wait indefinitely.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.into(),
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch(
        &self,
        project_id: i64,
        version_id: &str,
    ) -> Result<Arc<DependencyGraph>, FetchError> {
        let key = GraphKey {
            project_id,
            version_id: version_id.to_string(),
        };

        if let Some(graph) = self.cache.read().await.get(&key) {
            debug!(project_id, version_id, "dependency graph served from cache");
            return Ok(Arc::clone(graph));
        }

        info!(endpoint = %self.endpoint, project_id, version_id, "fetching dependency graph");

        let request = GraphQlRequest {
            query: DEPENDENCY_GRAPH_QUERY,
            operation_name: OPERATION_NAME,
            variables: Variables {
                project_id,
                version_id,
            },
        };

        let response = self.http.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "dependency graph request rejected");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let graph = Arc::new(parse_response(&body)?);

        info!(
            units = graph.units().len(),
            containers = graph.containers().len(),
            edges = graph.edges().len(),
            "dependency graph loaded"
        );

        self.cache.write().await.insert(key, Arc::clone(&graph));
        Ok(graph)
    }

    pub async fn is_cached(&self, project_id: i64, version_id: &str) -> bool {
        let key = GraphKey {
            project_id,
            version_id: version_id.to_string(),
        };
        self.cache.read().await.contains_key(&key)
    }

    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }
}
