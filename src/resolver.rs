//! Endpoint resolution against the remote solve service.
//!
//! Every call walks the candidate base URLs in order and stops at the first one
//! that works. Nothing is remembered between calls. Candidates are tried one at a
//! time, so the worst case latency is the sum of the per-candidate timeouts.
//!
//! NOTE: request bodies are never logged in full, only their sizes.

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{info, instrument, warn};

use crate::config::SolverConfig;
use crate::domain::ProblemRequest;
use crate::error::SolveError;
use crate::protocol::{HealthBodyWire, RawResponse, SolveRequestWire};

#[derive(Clone)]
pub struct Resolver {
  pub client: reqwest::Client,
  pub health_marker: Option<String>,
  pub health_timeout: Duration,
  pub solve_timeout: Duration,
  pub accept_plain_text: bool,
}

/// A successful solve: which candidate answered, and what it said.
#[derive(Clone, Debug)]
pub struct Resolved {
  pub base_url: String,
  pub response: RawResponse,
}

impl Resolver {
  pub fn from_config(cfg: &SolverConfig) -> Result<Self, SolveError> {
    let client = reqwest::Client::builder()
      .user_agent("leetsolve-backend/0.1")
      .build()
      .map_err(|e| SolveError::Transport(e.to_string()))?;

    Ok(Self {
      client,
      health_marker: cfg.health_marker.clone(),
      health_timeout: cfg.health_timeout(),
      solve_timeout: cfg.solve_timeout(),
      accept_plain_text: cfg.accept_plain_text,
    })
  }

  /// First healthy candidate, if any. Never errors: an unreachable service is just `None`.
  #[instrument(level = "info", skip(self, candidates), fields(candidates = candidates.len()))]
  pub async fn check_status(&self, candidates: &[String]) -> Option<String> {
    for base in candidates {
      match self.check_health(base).await {
        Ok(()) => {
          info!(target: "resolver", %base, "Health check succeeded");
          return Some(base.clone());
        }
        Err(e) => warn!(target: "resolver", %base, error = %e, "Health check failed"),
      }
    }
    None
  }

  async fn check_health(&self, base: &str) -> Result<(), SolveError> {
    let res = self.client.get(format!("{}/", base))
      .header(ACCEPT, "application/json")
      .timeout(self.health_timeout)
      .send().await?;

    if !res.status().is_success() {
      return Err(SolveError::Server { status: res.status() });
    }

    if let Some(marker) = &self.health_marker {
      let body: HealthBodyWire = res.json().await
        .map_err(|e| SolveError::Malformed(e.to_string()))?;
      if body.message.as_deref() != Some(marker.as_str()) {
        return Err(SolveError::Malformed(format!(
          "health marker mismatch (got {:?})",
          body.message
        )));
      }
    }
    Ok(())
  }

  /// Solve against the first candidate that produces a usable answer.
  /// Exhaustion is reported as `SolveError::Exhausted`; callers degrade to a fallback.
  #[instrument(
    level = "info",
    skip(self, req, candidates),
    fields(id = %req.id, language = %req.language, problem_len = req.text.len(), candidates = candidates.len())
  )]
  pub async fn solve(&self, req: &ProblemRequest, candidates: &[String]) -> Result<Resolved, SolveError> {
    let mut last = String::from("no backend candidates configured");
    for base in candidates {
      let start = Instant::now();
      match self.try_solve(base, req).await {
        Ok(response) => {
          info!(target: "resolver", %base, elapsed = ?start.elapsed(), "Solve succeeded");
          return Ok(Resolved { base_url: base.clone(), response });
        }
        Err(e) => {
          warn!(target: "resolver", %base, elapsed = ?start.elapsed(), error = %e, "Solve candidate failed");
          last = e.to_string();
        }
      }
    }
    Err(SolveError::Exhausted { attempts: candidates.len(), last })
  }

  async fn try_solve(&self, base: &str, req: &ProblemRequest) -> Result<RawResponse, SolveError> {
    let wire = SolveRequestWire { problem: &req.text, language: req.language.id() };
    let res = self.client.post(format!("{}/solve", base))
      .header(CONTENT_TYPE, "application/json")
      .header(ACCEPT, "application/json")
      .timeout(self.solve_timeout)
      .json(&wire)
      .send().await?;

    let status = res.status();
    if !status.is_success() {
      return Err(SolveError::Server { status });
    }

    let body = res.text().await?;
    match RawResponse::from_body(&body, self.accept_plain_text)? {
      RawResponse::ErrorBody { error } => Err(SolveError::Backend(error)),
      ok => Ok(ok),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{http::StatusCode, routing::{get, post}, Json, Router};
  use serde_json::json;

  use crate::domain::Language;
  use crate::testing::{dead_url, failing_backend, solving_backend, spawn_backend, test_config};

  fn resolver(cfg: &SolverConfig) -> Resolver {
    Resolver::from_config(cfg).unwrap()
  }

  fn req() -> ProblemRequest {
    ProblemRequest::new("Two Sum", Language::Rust).unwrap()
  }

  #[tokio::test]
  async fn solve_walks_candidates_in_order() {
    let dead = dead_url().await;
    let server_err = spawn_backend(failing_backend(StatusCode::BAD_GATEWAY)).await;
    let error_body = spawn_backend(Router::new().route(
      "/solve",
      post(|| async { Json(json!({ "error": "quota exceeded" })) }),
    )).await;
    let live = spawn_backend(solving_backend()).await;

    let cfg = test_config(vec![dead, server_err, error_body, live.clone()]);
    let resolved = resolver(&cfg).solve(&req(), &cfg.backend_urls).await.unwrap();
    assert_eq!(resolved.base_url, live);
    let text = resolved.response.solution_text().unwrap();
    assert!(text.contains("Solving: Two Sum\nrust\nreturn 42"));
  }

  #[tokio::test]
  async fn timeout_counts_as_candidate_failure() {
    let slow = spawn_backend(Router::new().route(
      "/solve",
      post(|| async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Json(json!({ "solution": "too late" }))
      }),
    )).await;
    let live = spawn_backend(solving_backend()).await;

    let mut cfg = test_config(vec![slow, live.clone()]);
    cfg.solve_timeout_ms = 100;
    let resolved = resolver(&cfg).solve(&req(), &cfg.backend_urls).await.unwrap();
    assert_eq!(resolved.base_url, live);
  }

  #[tokio::test]
  async fn exhaustion_reports_attempts_and_last_error() {
    let a = spawn_backend(failing_backend(StatusCode::NOT_FOUND)).await;
    let b = spawn_backend(Router::new().route(
      "/solve",
      post(|| async { Json(json!({ "message": "legacy shape" })) }),
    )).await;

    let cfg = test_config(vec![a, b]);
    match resolver(&cfg).solve(&req(), &cfg.backend_urls).await {
      Err(SolveError::Exhausted { attempts, last }) => {
        assert_eq!(attempts, 2);
        assert!(last.contains("No solution returned"), "{}", last);
      }
      other => panic!("unexpected {:?}", other),
    }
  }

  #[tokio::test]
  async fn no_candidates_is_exhaustion() {
    let cfg = test_config(vec![]);
    let err = resolver(&cfg).solve(&req(), &[]).await.unwrap_err();
    assert!(matches!(err, SolveError::Exhausted { attempts: 0, .. }));
  }

  #[tokio::test]
  async fn plain_text_body_accepted_verbatim() {
    let text_backend = spawn_backend(Router::new().route(
      "/solve",
      post(|| async { "## Solution\nrust\nfn f() {}" }),
    )).await;

    let cfg = test_config(vec![text_backend.clone()]);
    let resolved = resolver(&cfg).solve(&req(), &cfg.backend_urls).await.unwrap();
    assert_eq!(resolved.response, RawResponse::PlainText("## Solution\nrust\nfn f() {}".into()));

    let mut strict = test_config(vec![text_backend]);
    strict.accept_plain_text = false;
    assert!(resolver(&strict).solve(&req(), &strict.backend_urls).await.is_err());
  }

  #[tokio::test]
  async fn health_marker_narrows_success() {
    let live = spawn_backend(solving_backend()).await;
    let bare = spawn_backend(Router::new().route("/", get(|| async { "ok" }))).await;

    let cfg = test_config(vec![bare.clone(), live.clone()]);
    // Without a marker any 2xx will do.
    assert_eq!(resolver(&cfg).check_status(&cfg.backend_urls).await, Some(bare));

    let mut marked = cfg.clone();
    marked.health_marker = Some("solver up".into());
    assert_eq!(resolver(&marked).check_status(&marked.backend_urls).await, Some(live));

    marked.health_marker = Some("something else".into());
    assert_eq!(resolver(&marked).check_status(&marked.backend_urls).await, None);
  }

  #[tokio::test]
  async fn all_non_2xx_means_offline() {
    let a = spawn_backend(failing_backend(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let b = spawn_backend(failing_backend(StatusCode::SERVICE_UNAVAILABLE)).await;
    let cfg = test_config(vec![a, b, dead_url().await]);
    assert_eq!(resolver(&cfg).check_status(&cfg.backend_urls).await, None);
  }
}
