//! LeetSolve · coding-challenge helper backend
//!
//! - Axum HTTP API for the UI (status, languages, solve)
//! - Ordered backend candidates for the remote solve service, first success wins
//! - Response interpretation into typed sections (code vs. prose)
//! - Local fallback bank when every candidate is down
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   SOLVER_CONFIG_PATH  : path to TOML config (candidates, timeouts, fallback bank)
//!   SOLVER_BACKEND_URLS : comma-separated candidate base URLs (overrides TOML)
//!   SOLVER_TIMEOUT_MS   : per-candidate solve timeout (overrides TOML)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod telemetry;
mod config;
mod error;
mod domain;
mod protocol;
mod interpreter;
mod fallback;
mod resolver;
mod state;
mod logic;
mod routes;
#[cfg(test)]
mod testing;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::from_env()?);
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "leetsolve_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "leetsolve_backend", error = %e, "Failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  info!(target: "leetsolve_backend", "Shutdown signal received");
}
