//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs basic request/result info.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::HOST, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, instrument};

use crate::domain::Language;
use crate::error::SolveError;
use crate::logic::{check_status, solve_problem};
use crate::protocol::*;
use crate::state::AppState;

fn host_of(headers: &HeaderMap) -> Option<&str> {
    headers.get(HOST).and_then(|v| v.to_str().ok())
}

impl IntoResponse for SolveError {
    fn into_response(self) -> Response {
        let status = match &self {
            SolveError::Validation(_) => StatusCode::BAD_REQUEST,
            SolveError::Busy => StatusCode::CONFLICT,
            _ => StatusCode::BAD_GATEWAY,
        };
        (status, Json(ErrorOut { error: self.to_string() })).into_response()
    }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state, headers))]
pub async fn http_get_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let status = check_status(&state, host_of(&headers)).await;
    info!(target: "solve", online = status.online, backend = ?status.backend, "HTTP status served");
    Json(status)
}

#[instrument(level = "debug")]
pub async fn http_get_languages() -> impl IntoResponse {
    let out: Vec<LanguageOut> = Language::ALL
        .iter()
        .map(|l| LanguageOut { value: l.id(), label: l.label() })
        .collect();
    Json(out)
}

#[instrument(level = "info", skip(state, headers, body), fields(problem_len = body.problem.len(), language = ?body.language))]
pub async fn http_post_solve(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<SolveIn>,
) -> Result<Json<SolveOut>, SolveError> {
    let _slot = state.begin_solve()?;
    let out = solve_problem(&state, &body.problem, body.language.as_deref(), host_of(&headers)).await?;
    info!(target: "solve", id = %out.id, origin = ?out.origin, sections = out.sections.len(), "HTTP solve served");
    Ok(Json(out))
}
