//! The authentication probe seam.
//!
//! A probe performs exactly one login attempt against the target and
//! reports what it saw. Protocol implementations live outside this crate;
//! the orchestrator only depends on [`AuthProbe`].

use std::sync::Arc;
use std::time::Duration;

use credtrial_types::{AttemptOutcome, ErrorKind, ResponseSignals, TargetDescriptor};

/// Everything a probe needs besides the candidate itself.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptContext {
    pub target: TargetDescriptor,
    /// Per-attempt budget. Enforcing it is the probe's job.
    pub timeout: Duration,
    pub proxy: Option<String>,
}

impl AttemptContext {
    pub fn new(target: TargetDescriptor, timeout: Duration) -> Self {
        Self {
            target,
            timeout,
            proxy: None,
        }
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// Result of one probe call. Failures travel in `signals.error`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeResponse {
    pub success: bool,
    pub signals: ResponseSignals,
}

impl ProbeResponse {
    pub fn accepted(signals: ResponseSignals) -> Self {
        Self {
            success: true,
            signals,
        }
    }

    /// A clean rejection: the server answered and said no.
    pub fn rejected(signals: ResponseSignals) -> Self {
        Self {
            success: false,
            signals,
        }
    }

    pub fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::rejected(ResponseSignals::new().with_error(kind).with_message(message))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.signals.error
    }

    pub fn into_outcome(self, candidate: impl Into<String>) -> AttemptOutcome {
        AttemptOutcome {
            candidate: candidate.into(),
            success: self.success,
            error: self.signals.error,
            signals: self.signals,
        }
    }
}

/// A per-attempt failure, for probe implementations that prefer `?`
/// internally. Converts into a failed [`ProbeResponse`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ProbeError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ProbeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<ProbeError> for ProbeResponse {
    fn from(err: ProbeError) -> Self {
        ProbeResponse::failed(err.kind, err.message)
    }
}

/// One login attempt per call. Implementations must be shareable across
/// worker threads.
pub trait AuthProbe: Send + Sync {
    fn attempt(&self, candidate: &str, context: &AttemptContext) -> ProbeResponse;

    fn name(&self) -> &str {
        "probe"
    }
}

impl<F> AuthProbe for F
where
    F: Fn(&str, &AttemptContext) -> ProbeResponse + Send + Sync,
{
    fn attempt(&self, candidate: &str, context: &AttemptContext) -> ProbeResponse {
        self(candidate, context)
    }

    fn name(&self) -> &str {
        "fn"
    }
}

/// Box a closure as a shareable probe.
pub fn from_fn<F>(f: F) -> Arc<dyn AuthProbe>
where
    F: Fn(&str, &AttemptContext) -> ProbeResponse + Send + Sync + 'static,
{
    Arc::new(f)
}
