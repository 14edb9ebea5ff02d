//! Application state: solver config, the endpoint resolver, the fallback bank, and
//! the single-flight guard for solves.
//!
//! Nothing here is persisted. Requests are built per call and dropped afterwards.

use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, instrument};

use crate::config::{load_solver_config_from_env, SolverConfig};
use crate::error::SolveError;
use crate::fallback::FallbackBank;
use crate::resolver::Resolver;

pub struct AppState {
    pub config: SolverConfig,
    pub resolver: Resolver,
    pub fallback: FallbackBank,
    /// Held for the duration of one solve; a second concurrent solve is refused.
    solve_lock: Mutex<()>,
}

impl AppState {
    /// Build state from env: load config, build the HTTP client and fallback bank.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Result<Self, SolveError> {
        Self::from_config(load_solver_config_from_env())
    }

    pub fn from_config(config: SolverConfig) -> Result<Self, SolveError> {
        let resolver = Resolver::from_config(&config)?;
        let fallback = FallbackBank::new(&config.fallbacks);

        info!(
            target: "leetsolve_backend",
            candidates = ?config.backend_urls,
            local_url = ?config.local_url,
            health_marker = config.health_marker.is_some(),
            solve_timeout_ms = config.solve_timeout_ms,
            fallback_entries = fallback.len(),
            "Solver state ready"
        );

        Ok(Self {
            config,
            resolver,
            fallback,
            solve_lock: Mutex::new(()),
        })
    }

    /// Claim the single solve slot, or fail with `Busy` if one is pending.
    pub fn begin_solve(&self) -> Result<MutexGuard<'_, ()>, SolveError> {
        self.solve_lock.try_lock().map_err(|_| SolveError::Busy)
    }
}
