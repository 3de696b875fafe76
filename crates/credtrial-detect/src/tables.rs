//! Keyword and header tables driving detection.
//!
//! Tables are data: they can be replaced or extended (e.g. loaded from JSON)
//! without touching the rule engine in [`crate::analyzer`].

use serde::{Deserialize, Serialize};

pub const BLOCK_KEYWORDS: &[&str] = &[
    "banned",
    "blocked",
    "lockout",
    "denied",
    "rejected",
    "too many",
    "brute force",
    "throttled",
    "rate limit",
    "captcha",
    "recaptcha",
    "temporary block",
    "suspicious",
    "abuse",
    "anomalous",
    "unusual",
    "security",
    "firewall",
    "block",
];

pub const RATE_LIMIT_HEADERS: &[&str] = &["X-RateLimit-Remaining", "Retry-After", "X-Retry-After"];

pub const WAF_HEADERS: &[&str] = &[
    "X-WAF",
    "X-XSS-Protection",
    "X-Content-Security-Policy",
    "X-WebKit-CSP",
    "X-Content-Type-Options",
    "X-Frame-Options",
    "Strict-Transport-Security",
    "Content-Security-Policy",
    "X-Sucuri-ID",
    "Server-Timing",
    "X-Powered-By",
];

pub const WAF_VENDOR_TOKENS: &[&str] = &["cloudflare", "waf", "firewall", "wordfence", "sucuri", "akamai"];

pub const MFA_KEYWORDS: &[&str] = &[
    "two-factor",
    "two factor",
    "2fa",
    "second factor",
    "verification code",
    "security code",
    "authenticator",
    "google authenticator",
    "authy",
    "totp",
    "hotp",
    "one-time",
    "one time",
    "code",
    "token",
];

pub const BLOCKED_STATUSES: &[u16] = &[403, 429, 503];

/// "Accepted but incomplete": a second factor is pending.
pub const PARTIAL_AUTH_STATUS: u16 = 202;

#[derive(Debug, thiserror::Error)]
pub enum TablesError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// All tables consulted by the analyzer. Keywords are matched lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionTables {
    pub block_keywords: Vec<String>,
    pub blocked_statuses: Vec<u16>,
    pub rate_limit_headers: Vec<String>,
    pub waf_headers: Vec<String>,
    pub waf_vendor_tokens: Vec<String>,
    pub mfa_keywords: Vec<String>,
    pub partial_auth_status: u16,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

impl Default for DetectionTables {
    fn default() -> Self {
        Self {
            block_keywords: owned(BLOCK_KEYWORDS),
            blocked_statuses: BLOCKED_STATUSES.to_vec(),
            rate_limit_headers: RATE_LIMIT_HEADERS.iter().map(|s| s.to_string()).collect(),
            waf_headers: WAF_HEADERS.iter().map(|s| s.to_string()).collect(),
            waf_vendor_tokens: owned(WAF_VENDOR_TOKENS),
            mfa_keywords: owned(MFA_KEYWORDS),
            partial_auth_status: PARTIAL_AUTH_STATUS,
        }
    }
}

impl DetectionTables {
    /// Parse tables from JSON; missing tables keep their built-in values.
    pub fn from_json(json: &str) -> Result<Self, TablesError> {
        let mut tables: Self = serde_json::from_str(json)?;
        tables.normalize();
        Ok(tables)
    }

    /// Add block keywords on top of the current set.
    pub fn with_block_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.block_keywords.extend(keywords.into_iter().map(Into::into));
        self.normalize();
        self
    }

    /// Add WAF vendor tokens on top of the current set.
    pub fn with_waf_vendor_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.waf_vendor_tokens.extend(tokens.into_iter().map(Into::into));
        self.normalize();
        self
    }

    pub(crate) fn normalize(&mut self) {
        for list in [
            &mut self.block_keywords,
            &mut self.waf_vendor_tokens,
            &mut self.mfa_keywords,
        ] {
            for item in list.iter_mut() {
                *item = item.to_lowercase();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_lowercase() {
        let tables = DetectionTables::default();
        assert!(tables.block_keywords.iter().all(|k| *k == k.to_lowercase()));
        assert!(tables.mfa_keywords.contains(&"2fa".to_string()));
        assert_eq!(tables.blocked_statuses, vec![403, 429, 503]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tables = DetectionTables::from_json(r#"{ "waf_vendor_tokens": ["Imperva"] }"#).unwrap();
        assert_eq!(tables.waf_vendor_tokens, vec!["imperva"]);
        assert_eq!(tables.block_keywords, DetectionTables::default().block_keywords);
    }

    #[test]
    fn test_extend_block_keywords() {
        let tables = DetectionTables::default().with_block_keywords(["GESPERRT"]);
        assert!(tables.block_keywords.contains(&"gesperrt".to_string()));
    }
}
