//! Structured run reports.
//!
//! JSON is the only rendering produced here; other formats consume the
//! same serialized record.

use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use credtrial_types::{EngineResult, TargetDescriptor};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ReportError;
use crate::protocol::Protocol;

pub const TOOL_NAME: &str = "credtrial";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub tool: String,
    /// RFC 3339, UTC.
    pub generated_at: String,
    pub target: TargetDescriptor,
    pub protocol: Protocol,
    pub result: EngineResult,
}

impl SessionReport {
    pub fn new(target: TargetDescriptor, protocol: Protocol, result: EngineResult) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            target,
            protocol,
            result,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json_pretty()?)?;
        info!(path = %path.display(), "report written");
        Ok(())
    }

    pub fn read_json(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
