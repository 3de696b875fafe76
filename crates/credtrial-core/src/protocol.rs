//! Supported authentication protocols and their default ports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Services a session can target. Selected once, at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Ssh,
    Http,
    Ftp,
    Smtp,
    Rdp,
}

impl Protocol {
    pub const ALL: [Protocol; 5] = [
        Protocol::Ssh,
        Protocol::Http,
        Protocol::Ftp,
        Protocol::Smtp,
        Protocol::Rdp,
    ];

    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::Ssh => 22,
            Protocol::Http => 80,
            Protocol::Ftp => 21,
            Protocol::Smtp => 25,
            Protocol::Rdp => 3389,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Ssh => "ssh",
            Protocol::Http => "http",
            Protocol::Ftp => "ftp",
            Protocol::Smtp => "smtp",
            Protocol::Rdp => "rdp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Protocol::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownProtocol(s.to_string()))
    }
}
