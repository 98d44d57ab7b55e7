//! Library API for depview.
//!
//! The CLI commands print output and return exit codes. These functions
//! return proper Result types for calling code instead.
//!
//! # Example
//!
//! ```no_run
//! use depview::{SourceConfig, ViewState, TransformOptions, compose_view, fetch_graph};
//!
//! # async fn run() -> Result<(), depview::DepviewError> {
//! let graph = fetch_graph(&SourceConfig::default()).await?;
//! let view = compose_view(&graph, &ViewState::default(), &TransformOptions::default());
//! println!("{}", serde_json::to_string_pretty(&view)?);
//! # Ok(())
//! # }
//! ```

use crate::config::{Config, ConfigError, SourceConfig};
use crate::model::DependencyGraph;
use crate::query::{FetchError, FetchState, GraphClient};
use crate::selection::ParseSelectionError;
use crate::transform::TransformOptions;
use crate::view::{ViewModel, ViewState, ViewUpdate};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during depview operations.
#[derive(Debug, Error)]
pub enum DepviewError {
    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The dependency graph could not be fetched.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Unknown filter or highlight value.
    #[error("Selection error: {0}")]
    Selection(#[from] ParseSelectionError),

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The view could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load `.depview.toml` from `dir`, or defaults if the file is absent.
pub fn load_config(dir: &Path) -> Result<Config, DepviewError> {
    Ok(Config::load(dir)?)
}

/// Fetch the dependency graph described by `source` with a one-off client.
pub async fn fetch_graph(source: &SourceConfig) -> Result<Arc<DependencyGraph>, DepviewError> {
    let client = GraphClient::new(source.endpoint.clone(), source.timeout())?;
    Ok(client.fetch(source.project_id, &source.version_id).await?)
}

/// Build a view state from textual selections, starting from the defaults.
/// Absent fields keep their default; an unknown filter or highlight fails.
pub fn view_state(selections: &ViewUpdate) -> Result<ViewState, DepviewError> {
    let mut state = ViewState::default();
    state.apply(selections)?;
    Ok(state)
}

/// Compose the view of a fetched graph.
pub fn compose_view(
    graph: &Arc<DependencyGraph>,
    state: &ViewState,
    options: &TransformOptions,
) -> ViewModel {
    ViewModel::compose(&FetchState::Ready(Arc::clone(graph)), state, options)
}
