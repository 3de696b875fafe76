//! Engine configuration: concurrency, timeouts, cooldown and stop condition.
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for one orchestrated run.
///
/// Missing fields fall back to the defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of parallel workers (default: 5).
    pub concurrency: usize,
    /// Per-attempt timeout handed to the probe, in seconds (default: 10).
    pub timeout_secs: u64,
    /// Stop scheduling new attempts once one succeeds (default: true).
    pub stop_on_success: bool,
    /// Pause applied to a worker after a detection escalation, in ms (default: 5000).
    pub cooldown_ms: u64,
    /// Cap on the candidate sequence length. None = unlimited.
    pub max_candidates: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            timeout_secs: 10,
            stop_on_success: true,
            cooldown_ms: 5_000,
            max_candidates: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigParseError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown_ms = u64::try_from(cooldown.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_stop_on_success(mut self, stop: bool) -> Self {
        self.stop_on_success = stop;
        self
    }

    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = Some(max);
        self
    }
}
