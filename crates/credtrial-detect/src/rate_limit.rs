//! Rate-limit header extraction.

use credtrial_types::ResponseSignals;
use serde::{Deserialize, Serialize};

const REMAINING_HEADERS: &[&str] = &["X-RateLimit-Remaining", "RateLimit-Remaining"];
const LIMIT_HEADERS: &[&str] = &["X-RateLimit-Limit", "RateLimit-Limit"];
const RESET_HEADERS: &[&str] = &["X-RateLimit-Reset", "RateLimit-Reset", "Retry-After", "X-Retry-After"];

/// Raw rate-limit header values reported by a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub remaining: Option<String>,
    pub limit: Option<String>,
    pub reset: Option<String>,
}

impl RateLimitInfo {
    /// Extract the first matching header of each kind. `None` when the
    /// response carries no rate-limit header at all.
    pub fn from_signals(signals: &ResponseSignals) -> Option<Self> {
        let first = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| signals.header(name))
                .map(str::to_string)
        };
        let info = Self {
            remaining: first(REMAINING_HEADERS),
            limit: first(LIMIT_HEADERS),
            reset: first(RESET_HEADERS),
        };
        if info == Self::default() {
            None
        } else {
            Some(info)
        }
    }

    /// Remaining budget as an integer, when it parses.
    pub fn remaining_count(&self) -> Option<i64> {
        self.remaining.as_deref().and_then(|v| v.trim().parse().ok())
    }
}
