//! Loading solver configuration (backend candidates, timeouts, fallback bank) from TOML + env.
//!
//! See `SolverConfig` and `FallbackCfg` for the expected schema:
//!
//! ```toml
//! backend_urls = ["http://localhost:5000", "https://solver.example.com"]
//! local_url = "http://127.0.0.1:5000"
//! health_marker = "LeetCode solver is running"
//! health_timeout_ms = 3000
//! solve_timeout_ms = 30000
//! accept_plain_text = true
//!
//! [[fallbacks]]
//! language = "python"
//! title = "Two Sum"
//! keywords = ["two sum", "target"]
//! code = "class Solution: ..."
//! explanation = "Hash map of seen values."
//! ```

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::Language;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
  /// Ordered candidate base URLs; first success wins per call.
  pub backend_urls: Vec<String>,
  /// Preferred when the UI is served from a local hostname.
  pub local_url: Option<String>,
  /// When set, the health body `{ "message": ... }` must equal this literal.
  pub health_marker: Option<String>,
  pub health_timeout_ms: u64,
  pub solve_timeout_ms: u64,
  /// Accept a non-JSON 2xx body verbatim as the solution text.
  pub accept_plain_text: bool,
  pub fallbacks: Vec<FallbackCfg>,
}

impl Default for SolverConfig {
  fn default() -> Self {
    Self {
      backend_urls: vec![DEFAULT_BACKEND_URL.into()],
      local_url: None,
      health_marker: None,
      health_timeout_ms: 3_000,
      solve_timeout_ms: 30_000,
      accept_plain_text: true,
      fallbacks: Vec::new(),
    }
  }
}

/// Canned solution entry accepted in TOML configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct FallbackCfg {
  pub language: Language,
  pub title: String,
  #[serde(default)] pub keywords: Vec<String>,
  pub code: String,
  #[serde(default)] pub explanation: Option<String>,
}

impl SolverConfig {
  pub fn health_timeout(&self) -> Duration { Duration::from_millis(self.health_timeout_ms) }

  pub fn solve_timeout(&self) -> Duration { Duration::from_millis(self.solve_timeout_ms) }

  /// Candidate list for a UI request arriving with the given `Host` header.
  /// Local hosts put `local_url` in front; duplicates are removed, order kept.
  pub fn candidates_for_host(&self, host: Option<&str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(self.backend_urls.len() + 1);
    if let (Some(local), true) = (&self.local_url, host.map(is_local_host).unwrap_or(false)) {
      out.push(normalize_base(local));
    }
    for url in &self.backend_urls {
      let url = normalize_base(url);
      if !url.is_empty() && !out.contains(&url) {
        out.push(url);
      }
    }
    out
  }

  /// Apply SOLVER_BACKEND_URLS / SOLVER_TIMEOUT_MS on top of file values.
  fn apply_env_overrides(&mut self) {
    if let Ok(urls) = std::env::var("SOLVER_BACKEND_URLS") {
      let parsed = parse_url_list(&urls);
      if parsed.is_empty() {
        warn!(target: "leetsolve_backend", "SOLVER_BACKEND_URLS is set but empty; keeping configured candidates");
      } else {
        self.backend_urls = parsed;
      }
    }
    if let Ok(ms) = std::env::var("SOLVER_TIMEOUT_MS") {
      match ms.trim().parse::<u64>() {
        Ok(ms) => self.solve_timeout_ms = ms,
        Err(e) => warn!(target: "leetsolve_backend", value = %ms, error = %e, "Ignoring invalid SOLVER_TIMEOUT_MS"),
      }
    }
  }
}

pub fn parse_url_list(raw: &str) -> Vec<String> {
  raw.split(',')
    .map(normalize_base)
    .filter(|s| !s.is_empty())
    .collect()
}

/// Trim whitespace and trailing slashes so `{base}/solve` joins cleanly.
fn normalize_base(url: &str) -> String {
  url.trim().trim_end_matches('/').to_string()
}

/// Host header values look like `localhost:3000`, `127.0.0.1`, or `[::1]:3000`.
pub fn is_local_host(host: &str) -> bool {
  let host = host.trim();
  let name = if let Some(rest) = host.strip_prefix('[') {
    rest.split(']').next().unwrap_or(rest)
  } else {
    host.rsplit_once(':').map(|(h, _)| h).unwrap_or(host)
  };
  let name = name.to_ascii_lowercase();
  name == "localhost" || name == "127.0.0.1" || name == "::1" || name.ends_with(".local")
}

/// Load `SolverConfig` from SOLVER_CONFIG_PATH, then apply env overrides.
/// On any parsing/IO error the defaults are used.
pub fn load_solver_config_from_env() -> SolverConfig {
  let mut cfg = match std::env::var("SOLVER_CONFIG_PATH") {
    Ok(path) => load_solver_config(&path).unwrap_or_default(),
    Err(_) => SolverConfig::default(),
  };
  cfg.apply_env_overrides();
  cfg
}

pub fn load_solver_config(path: &str) -> Option<SolverConfig> {
  match std::fs::read_to_string(path) {
    Ok(s) => match toml::from_str::<SolverConfig>(&s) {
      Ok(cfg) => {
        info!(target: "leetsolve_backend", %path, candidates = cfg.backend_urls.len(), fallbacks = cfg.fallbacks.len(), "Loaded solver config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "leetsolve_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "leetsolve_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
