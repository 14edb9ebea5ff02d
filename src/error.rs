//! Error taxonomy for solve/health operations.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolveError {
  /// Network failure reaching a candidate.
  #[error("Transport error: {0}")]
  Transport(String),

  #[error("Request timed out")]
  Timeout,

  /// Non-2xx from a candidate.
  #[error("Server error: {status}")]
  Server { status: StatusCode },

  /// Body not parseable, or missing the expected field.
  #[error("Malformed response: {0}")]
  Malformed(String),

  /// The service answered with an `{ "error": ... }` body.
  #[error("Backend error: {0}")]
  Backend(String),

  /// Rejected locally, before any network call.
  #[error("{0}")]
  Validation(String),

  /// A solve is already pending; the caller must wait for it.
  #[error("A solve is already in progress")]
  Busy,

  #[error("All {attempts} backend candidates failed (last error: {last})")]
  Exhausted { attempts: usize, last: String },
}

impl From<reqwest::Error> for SolveError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_timeout() {
      SolveError::Timeout
    } else if e.is_decode() {
      SolveError::Malformed(e.to_string())
    } else {
      SolveError::Transport(e.to_string())
    }
  }
}
