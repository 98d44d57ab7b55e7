//! HTTP routes of the dashboard server, driven without a socket.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use depview::query::FetchState;
use depview::server::{AppState, create_router};
use depview::{TransformOptions, ViewState, parse_response};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const FIXTURE: &str = include_str!("fixtures/dependency_graph.json");

fn ready_state() -> Arc<AppState> {
    let graph = Arc::new(parse_response(FIXTURE.as_bytes()).unwrap());
    Arc::new(AppState::with_fetch(
        FetchState::Ready(graph),
        ViewState::default(),
        TransformOptions::default(),
    ))
}

async fn send(state: &Arc<AppState>, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = create_router(Arc::clone(state))
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(state: &Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(state, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_state(state: &Arc<AppState>, body: Value) -> (StatusCode, Value) {
    let request = Request::post("/api/state")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, body) = send(state, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_index_serves_page() {
    let state = ready_state();
    let request = Request::get("/").body(Body::empty()).unwrap();
    let (status, body) = send(&state, request).await;

    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("cytoscape"));
    assert!(html.contains("const STATIC_VIEW = null;"));
}

#[tokio::test]
async fn test_loading_view() {
    let state = Arc::new(AppState::new(
        ViewState::default(),
        TransformOptions::default(),
    ));

    let (status, view) = get_json(&state, "/api/view").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view, json!({ "status": "loading" }));

    let (status, health) = get_json(&state, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "loading");
    assert!(health["elements"].is_null());

    let (status, _) = get_json(&state, "/api/graph").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_failed_fetch_reports_error() {
    let state = Arc::new(AppState::with_fetch(
        FetchState::Failed("endpoint returned HTTP 500".into()),
        ViewState::default(),
        TransformOptions::default(),
    ));

    let (_, view) = get_json(&state, "/api/view").await;
    assert_eq!(view["status"], "error");
    assert!(
        view["message"]
            .as_str()
            .unwrap()
            .starts_with("Error loading data.")
    );

    let (status, body) = get_json(&state, "/api/graph").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "endpoint returned HTTP 500");
}

#[tokio::test]
async fn test_ready_view_and_graph() {
    let state = ready_state();

    let (status, view) = get_json(&state, "/api/view").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "ready");
    assert_eq!(view["render_key"], 0);
    assert_eq!(view["layout"]["name"], "cose");
    assert_eq!(view["summary"]["nodes"], 5);
    assert_eq!(view["summary"]["edges"], 14);

    let (status, graph) = get_json(&state, "/api/graph").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(graph["units"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_view_query_overrides_are_not_stored() {
    let state = ready_state();

    let (status, view) = get_json(&state, "/api/view?filter=unit&layout=grid").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["summary"]["nodes"], 3);
    assert_eq!(view["layout"]["name"], "grid");
    assert_eq!(view["render_key"], 0);

    let (_, stored) = get_json(&state, "/api/state").await;
    assert_eq!(stored["filter"], "all");
    assert_eq!(stored["layout"], "cose");

    let (status, _) = get_json(&state, "/api/view?highlight=files").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_state_updates() {
    let state = ready_state();

    let (status, body) = post_state(&state, json!({ "filter": "container" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["change"], "relayout");
    assert_eq!(body["state"]["render_key"], 1);

    let (_, body) = post_state(&state, json!({ "highlight": "hierarchy" })).await;
    assert_eq!(body["change"], "restyle");
    assert_eq!(body["state"]["render_key"], 1);

    let (_, body) = post_state(&state, json!({ "layout": "circle", "filter": "all" })).await;
    assert_eq!(body["change"], "relayout");
    assert_eq!(body["state"]["render_key"], 2);

    let (_, view) = get_json(&state, "/api/view").await;
    assert_eq!(view["render_key"], 2);
    assert_eq!(view["layout"]["name"], "circle");
    assert_eq!(view["state"]["highlight"], "hierarchy");
}

#[tokio::test]
async fn test_invalid_state_update_is_rejected() {
    let state = ready_state();

    let (status, body) = post_state(&state, json!({ "filter": "modules", "layout": "grid" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("modules"));

    let (_, stored) = get_json(&state, "/api/state").await;
    assert_eq!(stored["layout"], "cose");
    assert_eq!(stored["render_key"], 0);
}
