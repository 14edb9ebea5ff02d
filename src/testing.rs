//! Test helpers: throwaway solve services on ephemeral ports.

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::config::SolverConfig;

/// Serve `app` on 127.0.0.1 and return its base URL.
pub async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing listens on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn test_config(backend_urls: Vec<String>) -> SolverConfig {
    SolverConfig {
        backend_urls,
        health_timeout_ms: 500,
        solve_timeout_ms: 500,
        ..SolverConfig::default()
    }
}

/// Healthy service that answers every solve with an explanation plus a code
/// section for the requested language.
pub fn solving_backend() -> Router {
    Router::new()
        .route("/", get(|| async { Json(json!({ "message": "solver up" })) }))
        .route(
            "/solve",
            post(|Json(body): Json<Value>| async move {
                let lang = body["language"].as_str().unwrap_or("python").to_string();
                let problem = body["problem"].as_str().unwrap_or_default().to_string();
                Json(json!({
                    "solution": format!("## Explanation\nSolving: {}\n{}\nreturn 42\n## Done\nok", problem, lang),
                    "complexity": "**Time Complexity:** O(1)",
                }))
            }),
        )
}

/// Service that fails every request with the given status.
pub fn failing_backend(status: StatusCode) -> Router {
    Router::new()
        .route("/", get(move || async move { status }))
        .route("/solve", post(move || async move { status }))
}
