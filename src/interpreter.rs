//! Response interpretation: raw solution text → ordered, typed sections.
//!
//! Markers recognised while scanning line by line:
//!   - `## Title`           opens a text section titled `Title`
//!   - a bare identifier    (`python`, `go`, ...) opens a code section for that language
//!   - ```` ```lang ````    opens a fenced code section; only the closing fence ends it
//!
//! Blank lines are dropped. Sections without content are never emitted.

use std::mem;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{Language, Section, SectionKind, SectionRole};

const HEADING_MARKER: &str = "## ";
const FENCE: &str = "```";

/// Start of "real" code: imports, declarations, type definitions.
static DECL_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^\s*(class|def|function|func|fn|pub|public|private|impl|struct|enum|const|let|var|import|from|package|use|using|#include|type|interface|export|template)\b")
    .expect("invalid declaration regex")
});

/// Top-level (unindented) test-harness lines. Everything from the first match on is dropped.
static HARNESS_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r#"^(if __name__|#\s*(?i:test|example)|//\s*(?i:test|example)|console\.log\(|print\(|func main\(|fn main\(|int main\(|(sol|solution|s)\s*=\s*(new )?Solution\()"#)
    .expect("invalid harness regex")
});

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?i)time complexity\**\s*:?\**\s*(.+)$").expect("invalid time regex")
});

static SPACE_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"(?i)space complexity\**\s*:?\**\s*(.+)$").expect("invalid space regex")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
  AccumulatingText,
  AccumulatingCode { fenced: bool },
}

/// Map a fence info string (```` ```py ````) to a catalog identifier when we know it.
fn fence_title(tag: &str) -> String {
  let tag = tag.trim().to_ascii_lowercase();
  let mapped = match tag.as_str() {
    "py" | "python3" => "python",
    "js" | "node" => "javascript",
    "ts" => "typescript",
    "c++" | "cc" | "cxx" => "cpp",
    "c#" | "cs" => "csharp",
    "golang" => "go",
    "rs" => "rust",
    other => other,
  };
  mapped.to_string()
}

/// Info strings that tag examples or output, never the solution itself.
const NON_CODE_TAGS: &[&str] = &[
  "text", "txt", "plain", "plaintext", "output", "console", "json", "yaml", "yml", "toml",
  "xml", "bash", "sh", "shell", "zsh", "powershell", "markdown", "md", "diff", "csv",
];

/// A line closes the open fence when it is a bare ```` ``` ````, or when the fence is glued
/// to the end of a code line that has no other backticks. Returns the glued code, trimmed.
fn closing_fence(trimmed: &str) -> Option<&str> {
  let before = trimmed.strip_suffix(FENCE)?;
  if before.contains('`') {
    return None;
  }
  Some(before.trim_end())
}

fn flush(out: &mut Vec<Section>, section: Section) {
  if !section.is_empty() {
    out.push(section);
  }
}

/// Split `text` into sections, in text order.
pub fn parse_sections(text: &str) -> Vec<Section> {
  let mut out = Vec::new();
  let mut current = Section::text("");
  let mut state = State::AccumulatingText;

  for raw_line in text.lines() {
    let line = raw_line.trim_end();
    let trimmed = line.trim();

    if state == (State::AccumulatingCode { fenced: true }) {
      if let Some(before) = closing_fence(trimmed) {
        if !before.is_empty() {
          let keep = &line[..line.len() - FENCE.len()];
          current.lines.push(keep.trim_end().to_string());
        }
        flush(&mut out, mem::replace(&mut current, Section::text("")));
        state = State::AccumulatingText;
      } else if !trimmed.is_empty() {
        current.lines.push(line.to_string());
      }
      continue;
    }

    if let Some(title) = line.strip_prefix(HEADING_MARKER) {
      flush(&mut out, mem::replace(&mut current, Section::text(title.trim())));
      state = State::AccumulatingText;
    } else if let Some(tag) = trimmed.strip_prefix(FENCE) {
      flush(&mut out, mem::replace(&mut current, Section::code(fence_title(tag))));
      state = State::AccumulatingCode { fenced: true };
    } else if Language::from_id(trimmed).is_some() {
      flush(&mut out, mem::replace(&mut current, Section::code(trimmed)));
      state = State::AccumulatingCode { fenced: false };
    } else if !trimmed.is_empty() {
      current.lines.push(line.to_string());
    }
  }

  flush(&mut out, current);
  out
}

/// Keep all text sections; keep code sections only for the selected language.
pub fn filter_for_language(sections: Vec<Section>, language: Language) -> Vec<Section> {
  sections
    .into_iter()
    .filter(|s| s.kind == SectionKind::Text || s.title == language.id())
    .collect()
}

/// Rebuild marked text from sections. Code is always written as a fenced block,
/// so `parse_sections` on the result gives the same list back.
pub fn render_sections(sections: &[Section]) -> String {
  let mut out: Vec<String> = Vec::new();
  for s in sections {
    match s.kind {
      SectionKind::Text => {
        if !s.title.is_empty() {
          out.push(format!("{}{}", HEADING_MARKER, s.title));
        }
        out.extend(s.lines.iter().cloned());
      }
      SectionKind::Code => {
        out.push(format!("{}{}", FENCE, s.title));
        out.extend(s.lines.iter().cloned());
        out.push(FENCE.to_string());
      }
    }
  }
  out.join("\n")
}

/// Best-effort cut of an untagged code block down to the solution proper:
/// drop leading prose before the first declaration and trailing test harness.
/// Approximate by nature.
pub fn strip_scaffolding(lines: &[String]) -> Vec<String> {
  let start = lines.iter().position(|l| DECL_RE.is_match(l)).unwrap_or(0);
  let rest = &lines[start..];
  let end = rest
    .iter()
    .skip(1)
    .position(|l| HARNESS_RE.is_match(l))
    .map(|i| i + 1)
    .unwrap_or(rest.len());
  rest[..end].to_vec()
}

/// Untagged blocks, or blocks tagged with a language outside the catalog.
fn is_adoptable_tag(title: &str) -> bool {
  title.is_empty() || (Language::from_id(title).is_none() && !NON_CODE_TAGS.contains(&title))
}

/// Parse, then filter to `language`. When nothing is tagged for `language` but an
/// untagged (or unknown-language) block exists, that block is adopted as the solution after stripping
/// scaffolding. A blob with no markers degrades to a single untitled text section.
pub fn interpret(text: &str, language: Language) -> Vec<Section> {
  let mut sections = parse_sections(text);

  let has_own_code = sections.iter().any(|s| s.is_code() && s.title == language.id());
  if !has_own_code {
    let untagged = sections
      .iter_mut()
      .find(|s| s.is_code() && is_adoptable_tag(&s.title));
    if let Some(block) = untagged {
      let lines = strip_scaffolding(&block.lines);
      if !lines.is_empty() {
        block.title = language.id().to_string();
        block.lines = lines;
      }
    }
  }

  filter_for_language(sections, language)
}

/// Classify a section by what its heading says.
pub fn section_role(section: &Section) -> SectionRole {
  if section.is_code() {
    return SectionRole::Solution;
  }
  let title = section.title.to_lowercase();
  if title.contains("complexity") {
    SectionRole::Complexity
  } else if title.contains("edge case") {
    SectionRole::EdgeCases
  } else if title.contains("optimization") || title.contains("optimisation") {
    SectionRole::Optimizations
  } else if title.contains("explanation") || title.contains("approach") || title.contains("algorithm") || title.contains("intuition") {
    SectionRole::Explanation
  } else if title.contains("solution") {
    SectionRole::Solution
  } else {
    SectionRole::Other
  }
}

/// (time, space) values from lines like `**Time Complexity:** O(n)`.
pub fn complexity_of(section: &Section) -> (Option<String>, Option<String>) {
  let find = |re: &Regex| {
    section
      .lines
      .iter()
      .find_map(|l| re.captures(l).map(|c| c[1].trim().to_string()))
      .filter(|s| !s.is_empty())
  };
  (find(&*TIME_RE), find(&*SPACE_RE))
}
