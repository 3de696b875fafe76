//! Per-attempt outcomes, recorded errors and advisories.

use serde::{Deserialize, Serialize};

use crate::signals::{DetectionSignal, ErrorKind, ResponseSignals};

/// What happened when one candidate was tried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptOutcome {
    pub candidate: String,
    pub success: bool,
    pub error: Option<ErrorKind>,
    pub signals: ResponseSignals,
}

/// One absorbed per-attempt failure or detection escalation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub candidate: String,
    pub kind: ErrorKind,
    /// Detection verdict for the response (None for plain probe failures).
    #[serde(default)]
    pub detection: DetectionSignal,
    pub message: String,
    /// Index of the worker that observed the failure.
    pub worker: usize,
}

/// An observation surfaced next to the result without affecting scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub candidate: String,
    pub signal: DetectionSignal,
    pub reason: String,
}
