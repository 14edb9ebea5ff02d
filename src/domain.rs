//! Domain models: the language catalog, validated problem requests, and interpreted sections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SolveError;

/// Target language for a generated solution. The catalog is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  Python,
  JavaScript,
  Java,
  Cpp,
  CSharp,
  Go,
  Rust,
  TypeScript,
}

impl Default for Language {
  fn default() -> Self { Language::Python }
}

impl Language {
  pub const ALL: [Language; 8] = [
    Language::Python,
    Language::JavaScript,
    Language::Java,
    Language::Cpp,
    Language::CSharp,
    Language::Go,
    Language::Rust,
    Language::TypeScript,
  ];

  /// Identifier used on the wire and as a code-section marker.
  pub fn id(self) -> &'static str {
    match self {
      Language::Python => "python",
      Language::JavaScript => "javascript",
      Language::Java => "java",
      Language::Cpp => "cpp",
      Language::CSharp => "csharp",
      Language::Go => "go",
      Language::Rust => "rust",
      Language::TypeScript => "typescript",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Language::Python => "🐍 Python",
      Language::JavaScript => "🟨 JavaScript",
      Language::Java => "☕ Java",
      Language::Cpp => "⚡ C++",
      Language::CSharp => "🔷 C#",
      Language::Go => "🐹 Go",
      Language::Rust => "🦀 Rust",
      Language::TypeScript => "🔷 TypeScript",
    }
  }

  /// Exact identifier lookup (no trimming, no case folding).
  pub fn from_id(id: &str) -> Option<Language> {
    Language::ALL.iter().copied().find(|l| l.id() == id)
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.id())
  }
}

impl FromStr for Language {
  type Err = SolveError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Language::from_id(s.trim())
      .ok_or_else(|| SolveError::Validation(format!("Unsupported language: {}", s.trim())))
  }
}

/// A validated solve request. Created per user action.
#[derive(Clone, Debug)]
pub struct ProblemRequest {
  pub id: Uuid,
  pub text: String,
  pub language: Language,
}

impl ProblemRequest {
  /// Validate user input before anything touches the network.
  pub fn new(text: &str, language: Language) -> Result<Self, SolveError> {
    let text = text.trim();
    if text.is_empty() {
      return Err(SolveError::Validation("Problem description is required".into()));
    }
    Ok(Self { id: Uuid::new_v4(), text: text.to_string(), language })
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
  Code,
  Text,
}

/// A contiguous, typed chunk of interpreted response text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
  pub kind: SectionKind,
  pub title: String,
  pub lines: Vec<String>,
}

impl Section {
  pub fn text(title: impl Into<String>) -> Self {
    Self { kind: SectionKind::Text, title: title.into(), lines: Vec::new() }
  }

  pub fn code(title: impl Into<String>) -> Self {
    Self { kind: SectionKind::Code, title: title.into(), lines: Vec::new() }
  }

  pub fn with_lines<I, S>(mut self, lines: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.lines.extend(lines.into_iter().map(Into::into));
    self
  }

  pub fn is_code(&self) -> bool { self.kind == SectionKind::Code }

  pub fn is_empty(&self) -> bool { self.lines.is_empty() }
}

/// What a text section is about, derived from its heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionRole {
  Solution,
  Explanation,
  Complexity,
  Optimizations,
  EdgeCases,
  Other,
}
