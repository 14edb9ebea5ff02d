//! Core behaviors behind the HTTP handlers:
//!   - backend status (first healthy candidate)
//!   - solving: validate → resolve → interpret → filter, degrading to the fallback bank

use tracing::{info, instrument, warn};

use crate::domain::{Language, ProblemRequest, SectionKind};
use crate::error::SolveError;
use crate::interpreter::interpret;
use crate::protocol::{Origin, SectionOut, SolveOut, StatusOut};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn check_status(state: &AppState, host: Option<&str>) -> StatusOut {
  let candidates = state.config.candidates_for_host(host);
  let backend = state.resolver.check_status(&candidates).await;
  StatusOut { online: backend.is_some(), backend }
}

/// Resolve the selected language; a missing value means the default.
pub fn parse_language(language: Option<&str>) -> Result<Language, SolveError> {
  match language.map(str::trim).filter(|s| !s.is_empty()) {
    Some(id) => id.parse(),
    None => Ok(Language::default()),
  }
}

/// Solve a problem. Only validation errors surface; backend exhaustion degrades
/// to a fallback answer carrying a `notice`.
#[instrument(level = "info", skip(state, problem), fields(problem_len = problem.len()))]
pub async fn solve_problem(
  state: &AppState,
  problem: &str,
  language: Option<&str>,
  host: Option<&str>,
) -> Result<SolveOut, SolveError> {
  let language = parse_language(language)?;
  let req = ProblemRequest::new(problem, language)?;
  let candidates = state.config.candidates_for_host(host);

  let resolved = state.resolver.solve(&req, &candidates).await
    .and_then(|r| match r.response.solution_text() {
      Some(text) => Ok((r.base_url, text)),
      None => Err(SolveError::Malformed("backend answered without a solution".into())),
    });

  let (origin, backend, raw, mut notice) = match resolved {
    Ok((base, text)) => (Origin::Backend, Some(base), text, None),
    Err(e) => {
      warn!(target: "solve", id = %req.id, error = %e, "Backend unavailable; serving fallback");
      let fb = state.fallback.solve(&req);
      let notice = match &fb.matched {
        Some(title) => format!("API unavailable ({}). Showing a stored solution for \"{}\".", e, title),
        None => format!("API unavailable ({}). Showing a {} starter template.", e, language.label()),
      };
      (Origin::Fallback, None, fb.text, Some(notice))
    }
  };

  let sections = interpret(&raw, language);
  let code_sections = sections.iter().filter(|s| s.kind == SectionKind::Code).count();
  if code_sections == 0 {
    notice.get_or_insert_with(|| format!("No {} code found in the response.", language.label()));
  }

  info!(
    target: "solve",
    id = %req.id,
    %language,
    origin = ?origin,
    sections = sections.len(),
    code_sections,
    "Solve finished"
  );

  Ok(SolveOut {
    id: req.id,
    language,
    origin,
    backend,
    notice,
    sections: sections.iter().map(SectionOut::from_section).collect(),
    raw,
  })
}
