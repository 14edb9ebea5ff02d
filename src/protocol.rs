//! Wire structs: the outbound solve-service contract and the inbound UI API (serde ready).
//!
//! Outbound contract: `POST {base}/solve` with `{ "problem", "language" }`, answered by
//! `{ "solution", ... }`, `{ "error" }`, a JSON string, or (optionally) raw text.
//! The `languages: [...]` request shape and `message` response field are not supported.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Language, Section, SectionKind, SectionRole};
use crate::error::SolveError;

//
// Outbound (solve service)
//

#[derive(Debug, Serialize)]
pub struct SolveRequestWire<'a> {
    pub problem: &'a str,
    pub language: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct HealthBodyWire {
    #[serde(default)]
    pub message: Option<String>,
}

/// Backend answer, resolved once at the boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawResponse {
    PlainText(String),
    Structured {
        solution: String,
        approach: Option<String>,
        algorithm: Option<String>,
        complexity: Option<String>,
        example: Option<String>,
    },
    ErrorBody {
        error: String,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireBody {
    Text(String),
    Object(WireObject),
}

#[derive(Deserialize)]
struct WireObject {
    #[serde(default)]
    solution: Option<String>,
    #[serde(default)]
    approach: Option<String>,
    #[serde(default)]
    algorithm: Option<String>,
    #[serde(default)]
    complexity: Option<String>,
    #[serde(default)]
    example: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl RawResponse {
    /// Classify a 2xx body. Non-JSON bodies are accepted verbatim only when `accept_plain_text`.
    pub fn from_body(body: &str, accept_plain_text: bool) -> Result<Self, SolveError> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Err(SolveError::Malformed("empty body".into()));
        }

        match serde_json::from_str::<WireBody>(trimmed) {
            Ok(WireBody::Text(s)) => match non_empty(Some(s)) {
                Some(s) => Ok(RawResponse::PlainText(s)),
                None => Err(SolveError::Malformed("empty solution string".into())),
            },
            Ok(WireBody::Object(obj)) => {
                if let Some(solution) = non_empty(obj.solution) {
                    Ok(RawResponse::Structured {
                        solution,
                        approach: non_empty(obj.approach),
                        algorithm: non_empty(obj.algorithm),
                        complexity: non_empty(obj.complexity),
                        example: non_empty(obj.example),
                    })
                } else if let Some(error) = non_empty(obj.error) {
                    Ok(RawResponse::ErrorBody { error })
                } else {
                    Err(SolveError::Malformed("No solution returned".into()))
                }
            }
            Err(e) => {
                // Valid JSON of another shape (array, number, object with non-string fields)
                // is never treated as plain text.
                let is_json = serde_json::from_str::<serde_json::Value>(trimmed).is_ok();
                if accept_plain_text && !is_json {
                    Ok(RawResponse::PlainText(trimmed.to_string()))
                } else {
                    Err(SolveError::Malformed(e.to_string()))
                }
            }
        }
    }

    /// Full solution text with optional structured extras appended as `## ` sections.
    /// `ErrorBody` has no solution text.
    pub fn solution_text(&self) -> Option<String> {
        match self {
            RawResponse::PlainText(s) => Some(s.clone()),
            RawResponse::Structured { solution, approach, algorithm, complexity, example } => {
                let mut out = solution.clone();
                let extras = [
                    ("Approach", approach),
                    ("Algorithm", algorithm),
                    ("Complexity", complexity),
                    ("Example", example),
                ];
                for (title, body) in extras {
                    if let Some(body) = body {
                        out.push_str(&format!("\n\n## {}\n{}", title, body));
                    }
                }
                Some(out)
            }
            RawResponse::ErrorBody { .. } => None,
        }
    }
}

//
// Inbound (UI) request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct SolveIn {
    pub problem: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Where a displayed solution came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Backend,
    Fallback,
}

#[derive(Debug, Serialize)]
pub struct SectionOut {
    pub kind: SectionKind,
    pub title: String,
    pub role: SectionRole,
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
}

impl SectionOut {
    pub fn from_section(s: &Section) -> Self {
        let role = crate::interpreter::section_role(s);
        let (time, space) = if role == SectionRole::Complexity {
            crate::interpreter::complexity_of(s)
        } else {
            (None, None)
        };
        Self {
            kind: s.kind,
            title: s.title.clone(),
            role,
            lines: s.lines.clone(),
            time,
            space,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SolveOut {
    pub id: Uuid,
    pub language: Language,
    pub origin: Origin,
    pub backend: Option<String>,
    pub notice: Option<String>,
    pub sections: Vec<SectionOut>,
    pub raw: String,
}

#[derive(Serialize)]
pub struct StatusOut {
    pub online: bool,
    pub backend: Option<String>,
}

#[derive(Serialize)]
pub struct LanguageOut {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}
