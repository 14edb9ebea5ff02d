//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! Behavior:
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives like
//!   "info,solve=debug,leetsolve_backend=debug,tower_http=info").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//!
//! Targets used across the crate:
//! - `leetsolve_backend` : startup, config, server lifecycle
//! - `resolver`          : per-candidate attempts against the solve service
//! - `solve`             : request handling, interpretation, fallback decisions

use tracing_subscriber::EnvFilter;

/// Filter used when LOG_LEVEL is unset or does not parse, one directive per target.
const DEFAULT_TARGETS: &[(&str, &str)] = &[
    // everything not named below
    ("", "info"),
    // solve flow: validation, interpretation, fallback notices
    ("solve", "debug"),
    // one line per candidate attempt, with elapsed time
    ("resolver", "debug"),
    // startup inventory, config load, listener, shutdown
    ("leetsolve_backend", "debug"),
    // request/response spans from TraceLayer
    ("tower_http", "info"),
    ("axum", "info"),
];

/// `DEFAULT_TARGETS` as an `EnvFilter` directive string.
fn default_directives() -> String {
    DEFAULT_TARGETS
        .iter()
        .map(|(target, level)| {
            if target.is_empty() {
                level.to_string()
            } else {
                format!("{}={}", target, level)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(default_directives()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => {
            builder.json().init();
        }
        _ => {
            builder.init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_cover_every_target() {
        let directives = default_directives();
        assert!(directives.starts_with("info,"));
        for target in ["solve", "resolver", "leetsolve_backend", "tower_http"] {
            assert!(directives.contains(&format!("{}=", target)), "missing {}", target);
        }
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
