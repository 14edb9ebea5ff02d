//! Router assembly: JSON API, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - API under `/api/v1/...` (health, backend status, languages, solve)
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/status", get(http::http_get_status))
        .route("/api/v1/languages", get(http::http_get_languages))
        .route("/api/v1/solve", post(http::http_post_solve))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::SolverConfig;
    use crate::testing::{dead_url, failing_backend, solving_backend, spawn_backend, test_config};

    fn app_with(config: SolverConfig) -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::from_config(config).unwrap());
        (build_router(state.clone()), state)
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn solve_req(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/solve")
            .header("content-type", "application/json")
            .header("host", "app.example.com")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_and_languages() {
        let (app, _) = app_with(test_config(vec![]));
        let (status, body) = send(app.clone(), get_req("/api/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        let (status, body) = send(app, get_req("/api/v1/languages")).await;
        assert_eq!(status, StatusCode::OK);
        let langs = body.as_array().unwrap();
        assert_eq!(langs.len(), 8);
        assert_eq!(langs[0], json!({ "value": "python", "label": "🐍 Python" }));
    }

    #[tokio::test]
    async fn status_reports_first_healthy_candidate() {
        let dead = dead_url().await;
        let live = spawn_backend(solving_backend()).await;
        let (app, _) = app_with(test_config(vec![dead, live.clone()]));

        let (status, body) = send(app, get_req("/api/v1/status")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "online": true, "backend": live }));
    }

    #[tokio::test]
    async fn status_offline_when_all_candidates_fail() {
        let bad = spawn_backend(failing_backend(StatusCode::SERVICE_UNAVAILABLE)).await;
        let (app, _) = app_with(test_config(vec![bad, dead_url().await]));

        let (_, body) = send(app, get_req("/api/v1/status")).await;
        assert_eq!(body, json!({ "online": false, "backend": null }));
    }

    #[tokio::test]
    async fn solve_from_backend_filters_to_language() {
        let live = spawn_backend(solving_backend()).await;
        let (app, _) = app_with(test_config(vec![dead_url().await, live.clone()]));

        let (status, body) = send(app, solve_req(json!({ "problem": "  add two numbers ", "language": "go" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["origin"], "backend");
        assert_eq!(body["backend"], json!(live));
        assert_eq!(body["language"], "go");
        assert!(body["notice"].is_null());

        let sections = body["sections"].as_array().unwrap();
        let kinds: Vec<&str> = sections.iter().map(|s| s["kind"].as_str().unwrap()).collect();
        assert_eq!(kinds, vec!["text", "code", "text", "text"]);
        assert_eq!(sections[0]["lines"], json!(["Solving: add two numbers"]));
        assert_eq!(sections[1]["title"], "go");
        assert_eq!(sections[1]["lines"], json!(["return 42"]));
        assert_eq!(sections[3]["role"], "complexity");
        assert_eq!(sections[3]["time"], "O(1)");
    }

    #[tokio::test]
    async fn solve_defaults_to_python() {
        let live = spawn_backend(solving_backend()).await;
        let (app, _) = app_with(test_config(vec![live]));

        let (status, body) = send(app, solve_req(json!({ "problem": "anything" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["language"], "python");
        assert_eq!(body["sections"][1]["title"], "python");
    }

    #[tokio::test]
    async fn exhausted_candidates_serve_fallback() {
        let bad = spawn_backend(failing_backend(StatusCode::INTERNAL_SERVER_ERROR)).await;
        let (app, _) = app_with(test_config(vec![bad, dead_url().await]));

        let (status, body) = send(app, solve_req(json!({ "problem": "Two Sum: return indices", "language": "java" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["origin"], "fallback");
        assert!(body["backend"].is_null());
        assert!(body["notice"].as_str().unwrap().contains("Two Sum"));

        let code: Vec<&Value> = body["sections"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|s| s["kind"] == "code")
            .collect();
        assert_eq!(code.len(), 1);
        assert_eq!(code[0]["title"], "java");
    }

    #[tokio::test]
    async fn blank_problem_rejected_without_network() {
        // No candidates at all: a network attempt would fall back, not 400.
        let (app, _) = app_with(test_config(vec![]));
        let (status, body) = send(app, solve_req(json!({ "problem": " \n\t ", "language": "go" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Problem description is required");
    }

    #[tokio::test]
    async fn unknown_language_rejected() {
        let (app, _) = app_with(test_config(vec![]));
        let (status, body) = send(app, solve_req(json!({ "problem": "x", "language": "cobol" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unsupported language: cobol");
    }

    #[tokio::test]
    async fn concurrent_solve_is_refused() {
        let (app, state) = app_with(test_config(vec![]));
        let _pending = state.begin_solve().unwrap();

        let (status, body) = send(app, solve_req(json!({ "problem": "x" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "A solve is already in progress");
    }
}
