//! Candidate secrets and their provenance.

use serde::{Deserialize, Serialize};

/// Where a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Supplied verbatim by the wordlist.
    Original,
    /// Derived from another candidate by mutation or affixing.
    Mutated,
    /// Produced from the common-pattern dictionary and target hints.
    Predicted,
}

/// A single password string under trial.
///
/// Immutable once produced; the queue hands each candidate to exactly one
/// worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub value: String,
    pub provenance: Provenance,
    /// Likelihood estimate assigned by ranking (None if never ranked).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Candidate {
    pub fn new(value: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            value: value.into(),
            provenance,
            score: None,
        }
    }

    pub fn original(value: impl Into<String>) -> Self {
        Self::new(value, Provenance::Original)
    }

    pub fn mutated(value: impl Into<String>) -> Self {
        Self::new(value, Provenance::Mutated)
    }

    pub fn predicted(value: impl Into<String>) -> Self {
        Self::new(value, Provenance::Predicted)
    }

    /// Return a copy carrying the given score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
