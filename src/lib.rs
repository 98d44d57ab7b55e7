pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod layout;
pub mod model;
pub mod query;
pub mod selection;
pub mod server;
pub mod style;
pub mod stylesheet;
pub mod transform;
pub mod view;

pub use api::{DepviewError, compose_view, fetch_graph, load_config, view_state};
pub use cli::Cli;
pub use commands::{cmd_export, cmd_init, cmd_serve};
pub use config::{Config, SourceConfig};
pub use model::{DependencyGraph, Edge, EdgeKind, GraphNode, NodeCategory, NodeId};
pub use query::{FetchError, FetchState, GraphClient, parse_response};
pub use selection::{EdgeHighlight, NodeFilter};
pub use transform::{Elements, TransformOptions, build_elements};
pub use view::{ViewChange, ViewModel, ViewState, ViewUpdate};
