//! Response classification.
//!
//! Rules are evaluated in strict precedence, first match wins:
//! 1. block keyword in the message
//! 2. blocked status code
//! 3. exhausted rate-limit header
//! 4. WAF header or vendor token in a header value
//! 5. MFA keyword in the body, or partial-auth status
//!
//! Only the signal bag is consulted. A reported success never
//! short-circuits classification. The honeypot advisory sits outside
//! the chain.

use std::fmt;
use std::time::Duration;

use credtrial_types::{DetectionSignal, ResponseSignals};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::rate_limit::RateLimitInfo;
use crate::tables::DetectionTables;

/// Successful responses faster than this look canned.
pub const HONEYPOT_MAX_ELAPSED: Duration = Duration::from_millis(10);

const HONEYPOT_MARKER: &str = "honeypot";

/// The rule that produced a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum DetectionReason {
    BlockKeyword { keyword: String },
    BlockedStatus { status: u16 },
    RateLimitHeader { header: String, value: String },
    WafHeader { header: String },
    WafVendor { token: String },
    MfaKeyword { keyword: String },
    PartialAuthStatus { status: u16 },
}

// Escalation renderings always contain a block keyword, so the derived
// `blocked` flag of a run agrees with the classification.
impl fmt::Display for DetectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockKeyword { keyword } => write!(f, "blocked: message matched '{keyword}'"),
            Self::BlockedStatus { status } => write!(f, "blocked: status {status}"),
            Self::RateLimitHeader { header, value } => {
                write!(f, "blocked: rate limit exhausted ({header}: {value})")
            }
            Self::WafHeader { header } => write!(f, "firewall: header {header} present"),
            Self::WafVendor { token } => write!(f, "firewall: vendor token '{token}' in headers"),
            Self::MfaKeyword { keyword } => write!(f, "mfa prompt: body matched '{keyword}'"),
            Self::PartialAuthStatus { status } => write!(f, "mfa prompt: partial authentication status {status}"),
        }
    }
}

/// A verdict plus the rule behind it. `reason` is `None` for
/// `DetectionSignal::None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub signal: DetectionSignal,
    pub reason: Option<DetectionReason>,
}

impl Detection {
    fn clean() -> Self {
        Self {
            signal: DetectionSignal::None,
            reason: None,
        }
    }

    fn new(signal: DetectionSignal, reason: DetectionReason) -> Self {
        Self {
            signal,
            reason: Some(reason),
        }
    }

    pub fn is_escalation(&self) -> bool {
        self.signal.is_escalation()
    }
}

/// Stateless classifier over [`DetectionTables`].
#[derive(Debug, Clone, Default)]
pub struct DetectionAnalyzer {
    tables: DetectionTables,
}

impl DetectionAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keywords in `tables` are lower-cased on the way in.
    pub fn with_tables(mut tables: DetectionTables) -> Self {
        tables.normalize();
        Self { tables }
    }

    pub fn tables(&self) -> &DetectionTables {
        &self.tables
    }

    pub fn classify(&self, signals: &ResponseSignals) -> DetectionSignal {
        self.classify_detailed(signals).signal
    }

    pub fn classify_detailed(&self, signals: &ResponseSignals) -> Detection {
        let detection = self.evaluate(signals);
        match (&detection.signal, &detection.reason) {
            (signal, Some(reason)) if signal.is_escalation() => {
                warn!(signal = ?signal, %reason, "defense detected");
            }
            (signal, Some(reason)) => debug!(signal = ?signal, %reason, "response classified"),
            _ => {}
        }
        detection
    }

    fn evaluate(&self, signals: &ResponseSignals) -> Detection {
        if let Some(keyword) = signals
            .message
            .as_deref()
            .and_then(|m| self.block_keyword(m))
        {
            return Detection::new(
                DetectionSignal::Blocked,
                DetectionReason::BlockKeyword {
                    keyword: keyword.to_string(),
                },
            );
        }

        if let Some(status) = signals
            .status_code
            .filter(|s| self.tables.blocked_statuses.contains(s))
        {
            return Detection::new(DetectionSignal::Blocked, DetectionReason::BlockedStatus { status });
        }

        for header in &self.tables.rate_limit_headers {
            let Some(value) = signals.header(header) else {
                continue;
            };
            // Unparsable values say nothing about the remaining budget.
            if let Ok(n) = value.trim().parse::<f64>() {
                if n <= 0.0 {
                    return Detection::new(
                        DetectionSignal::Blocked,
                        DetectionReason::RateLimitHeader {
                            header: header.clone(),
                            value: value.to_string(),
                        },
                    );
                }
            }
        }

        if let Some(header) = self
            .tables
            .waf_headers
            .iter()
            .find(|h| signals.header(h).is_some())
        {
            return Detection::new(
                DetectionSignal::WafDetected,
                DetectionReason::WafHeader {
                    header: header.clone(),
                },
            );
        }

        for value in signals.headers.values() {
            let value = value.to_lowercase();
            if let Some(token) = self.tables.waf_vendor_tokens.iter().find(|t| value.contains(t.as_str())) {
                return Detection::new(
                    DetectionSignal::WafDetected,
                    DetectionReason::WafVendor { token: token.clone() },
                );
            }
        }

        if let Some(body) = signals.body.as_deref() {
            let body = body.to_lowercase();
            if let Some(keyword) = self.tables.mfa_keywords.iter().find(|k| body.contains(k.as_str())) {
                return Detection::new(
                    DetectionSignal::MfaDetected,
                    DetectionReason::MfaKeyword {
                        keyword: keyword.clone(),
                    },
                );
            }
        }

        if signals.status_code == Some(self.tables.partial_auth_status) {
            return Detection::new(
                DetectionSignal::MfaDetected,
                DetectionReason::PartialAuthStatus {
                    status: self.tables.partial_auth_status,
                },
            );
        }

        Detection::clean()
    }

    /// `Suspicious` when an acceptance looks too easy: success with status
    /// 200 in under 10 ms, or an explicit honeypot marker in the message or
    /// body. No elapsed time means no timing verdict.
    pub fn honeypot_advisory(&self, signals: &ResponseSignals) -> Option<DetectionSignal> {
        let mentions_marker = [signals.message.as_deref(), signals.body.as_deref()]
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(HONEYPOT_MARKER));

        let too_fast = signals.success == Some(true)
            && signals.status_code == Some(200)
            && signals.elapsed.is_some_and(|e| e < HONEYPOT_MAX_ELAPSED);

        (mentions_marker || too_fast).then_some(DetectionSignal::Suspicious)
    }

    pub fn rate_limit_info(&self, signals: &ResponseSignals) -> Option<RateLimitInfo> {
        RateLimitInfo::from_signals(signals)
    }

    /// True when `message` carries any block keyword (case-insensitive).
    pub fn message_indicates_block(&self, message: &str) -> bool {
        self.block_keyword(message).is_some()
    }

    fn block_keyword(&self, message: &str) -> Option<&str> {
        let message = message.to_lowercase();
        self.tables
            .block_keywords
            .iter()
            .find(|k| message.contains(k.as_str()))
            .map(String::as_str)
    }
}
