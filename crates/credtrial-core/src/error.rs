//! Session configuration and report errors.

use crate::protocol::Protocol;

/// Configuration-time failures. Any of these aborts a session before a
/// single attempt is scheduled.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown protocol '{0}' (expected one of ssh, http, ftp, smtp, rdp)")]
    UnknownProtocol(String),

    #[error("no candidates to try")]
    EmptyCandidates,

    #[error("no probe registered for protocol {0}")]
    ProbeUnavailable(Protocol),

    #[error("concurrency must be at least 1, got {0}")]
    InvalidConcurrency(usize),

    #[error("target host is empty")]
    MissingTarget,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
