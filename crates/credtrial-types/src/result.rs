//! Aggregate run result and the reason a run stopped.

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::outcome::{Advisory, ErrorRecord};

/// Why a run stopped scheduling attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A candidate was accepted and stop-on-success was set.
    Success,
    /// The queue ran dry.
    Exhausted,
    /// An external stop handle was triggered.
    Aborted,
}

/// Aggregate outcome of one run. Always produced, even with no success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineResult {
    pub success: bool,
    /// The accepted candidate (first writer wins).
    pub candidate: Option<Candidate>,
    /// Number of probe invocations.
    pub attempts: u64,
    pub elapsed_secs: f64,
    pub errors: Vec<ErrorRecord>,
    /// True iff any error message carries a blocking keyword.
    pub blocked: bool,
    #[serde(default)]
    pub advisories: Vec<Advisory>,
    pub stop_reason: StopReason,
}

impl EngineResult {
    /// The accepted password, if any.
    pub fn password(&self) -> Option<&str> {
        self.candidate.as_ref().map(|c| c.value.as_str())
    }
}
