use super::assets::render_page;
use crate::model::DependencyGraph;
use crate::query::{FetchState, GraphClient};
use crate::style;
use crate::transform::TransformOptions;
use crate::view::{ViewChange, ViewModel, ViewState, ViewUpdate};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, error, info};

/// State shared across handlers for the lifetime of the server.
pub struct AppState {
    pub fetch: RwLock<FetchState>,
    pub view: RwLock<ViewState>,
    pub options: TransformOptions,
}

impl AppState {
    /// State of a server whose graph request has not completed yet.
    pub fn new(view: ViewState, options: TransformOptions) -> Self {
        Self::with_fetch(FetchState::Loading, view, options)
    }

    pub fn with_fetch(fetch: FetchState, view: ViewState, options: TransformOptions) -> Self {
        Self {
            fetch: RwLock::new(fetch),
            view: RwLock::new(view),
            options,
        }
    }

    /// Compose the view for the stored state, or for `state` if given.
    pub async fn view_model(&self, state: Option<&ViewState>) -> ViewModel {
        let fetch = self.fetch.read().await.clone();
        match state {
            Some(state) => ViewModel::compose(&fetch, state, &self.options),
            None => {
                let view = self.view.read().await.clone();
                ViewModel::compose(&fetch, &view, &self.options)
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct StateResponse {
    state: ViewState,
    change: ViewChange,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/health", get(health_handler))
        .route("/api/view", get(view_handler))
        .route("/api/state", get(get_state_handler).post(update_state_handler))
        .route("/api/graph", get(graph_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(cors)
        .with_state(state)
}

/// Resolve the single graph request and record its outcome.
///
/// The fetch state moves out of `Loading` exactly once, when this returns.
pub async fn load_graph(
    state: Arc<AppState>,
    client: Arc<GraphClient>,
    project_id: i64,
    version_id: String,
) {
    let result = client.fetch(project_id, &version_id).await;
    if let Err(e) = &result {
        error!(error = %e, project_id, version_id = %version_id, "dependency graph request failed");
    }
    *state.fetch.write().await = FetchState::from(result);
}

/// Start the dashboard server
pub async fn serve(
    state: Arc<AppState>,
    port: u16,
    open_browser: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let addr = format!("127.0.0.1:{}", port);
    let url = format!("http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "dashboard listening");

    style::status(&format!("Dashboard running at {}", style::url(&url)));
    style::hint("Press Ctrl+C to stop");

    if open_browser && let Err(e) = open::that(&url) {
        style::warning(&format!("Could not open browser: {}", e));
    }

    axum::serve(listener, app).await?;

    Ok(())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

async fn index_handler() -> impl IntoResponse {
    Html(render_page(None))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let view = state.view_model(None).await;
    let summary = match &view {
        ViewModel::Ready { summary, .. } => Some(summary.as_ref().clone()),
        _ => None,
    };
    Json(json!({
        "status": view.status(),
        "elements": summary,
    }))
}

/// GET /api/view. Query parameters override the stored selections for this
/// request only.
async fn view_handler(
    State(state): State<Arc<AppState>>,
    Query(overrides): Query<ViewUpdate>,
) -> Response {
    let stored = state.view.read().await.clone();

    let mut view = stored.clone();
    if let Err(e) = view.apply(&overrides) {
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }
    view.render_key = stored.render_key;

    Json(state.view_model(Some(&view)).await).into_response()
}

async fn get_state_handler(State(state): State<Arc<AppState>>) -> Json<ViewState> {
    Json(state.view.read().await.clone())
}

async fn update_state_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ViewUpdate>,
) -> Response {
    let mut view = state.view.write().await;
    match view.apply(&update) {
        Ok(change) => {
            info!(
                layout = %view.layout,
                filter = %view.filter,
                highlight = %view.highlight,
                render_key = view.render_key,
                ?change,
                "view state updated"
            );
            Json(StateResponse {
                state: view.clone(),
                change,
            })
            .into_response()
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

async fn graph_handler(State(state): State<Arc<AppState>>) -> Response {
    let fetch = state.fetch.read().await.clone();
    match fetch {
        FetchState::Ready(graph) => {
            let graph: &DependencyGraph = &graph;
            Json(graph).into_response()
        }
        FetchState::Loading => {
            error_response(StatusCode::SERVICE_UNAVAILABLE, "dependency graph is still loading")
        }
        FetchState::Failed(message) => error_response(StatusCode::BAD_GATEWAY, message),
    }
}
