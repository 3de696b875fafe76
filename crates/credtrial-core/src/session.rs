//! Session assembly.
//!
//! [`Session::prepare`] does all configuration-time work: protocol and
//! probe selection, validation, and building the ordered candidate list.
//! Nothing is attempted until [`Session::run`].

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use credtrial_detect::{DetectionAnalyzer, DetectionTables};
use credtrial_engine::{AttemptOrchestrator, StopHandle};
use credtrial_generate::CandidateGenerator;
use credtrial_rank::CandidateRanker;
use credtrial_types::{Candidate, EngineConfig, TargetDescriptor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::protocol::Protocol;
use crate::registry::ProbeRegistry;
use crate::report::SessionReport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub target: TargetDescriptor,
    /// Protocol selector, e.g. "ssh". Parsed at prepare time.
    pub protocol: String,
    pub proxy: Option<String>,
    pub engine: EngineConfig,
    /// Keyword and header tables for response classification.
    pub detection: DetectionTables,
    /// Expand the wordlist with affix, leet and year combinations.
    pub generate: bool,
    /// Sort candidates by estimated likelihood before trying them.
    pub rank: bool,
    /// Trained ranking model; heuristic scoring when absent or unreadable.
    pub model_path: Option<PathBuf>,
    /// Grow the wordlist to this size by expanding a random sample of it.
    pub enhance: Option<usize>,
    /// Seed for the `enhance` sample; entropy when absent.
    pub seed: Option<u64>,
    /// Company name for predicted patterns.
    pub company: Option<String>,
    /// Derive predicted patterns from the target username.
    pub username_hints: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target: TargetDescriptor::new("", ""),
            protocol: Protocol::Ssh.as_str().to_string(),
            proxy: None,
            engine: EngineConfig::default(),
            detection: DetectionTables::default(),
            generate: false,
            rank: false,
            model_path: None,
            enhance: None,
            seed: None,
            company: None,
            username_hints: false,
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

pub struct Session {
    protocol: Protocol,
    target: TargetDescriptor,
    candidates: Vec<Candidate>,
    orchestrator: AttemptOrchestrator,
}

impl Session {
    /// Prepare on the system clock.
    pub fn prepare(
        config: SessionConfig,
        registry: &ProbeRegistry,
        wordlist: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let generator = CandidateGenerator::system(config.seed);
        Self::prepare_with_generator(config, registry, wordlist, generator)
    }

    pub fn prepare_with_generator(
        config: SessionConfig,
        registry: &ProbeRegistry,
        wordlist: Vec<String>,
        mut generator: CandidateGenerator,
    ) -> Result<Self, ConfigError> {
        let protocol: Protocol = config.protocol.parse()?;
        if config.target.host.trim().is_empty() {
            return Err(ConfigError::MissingTarget);
        }
        if config.engine.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(0));
        }
        let probe = registry.get(protocol)?;

        let mut target = config.target.clone();
        if target.port.is_none() {
            target.port = Some(protocol.default_port());
        }

        let candidates = build_candidates(&config, &target, wordlist, &mut generator);
        if candidates.is_empty() {
            return Err(ConfigError::EmptyCandidates);
        }

        let mut orchestrator = AttemptOrchestrator::new(probe, target.clone(), config.engine.clone())
            .with_analyzer(DetectionAnalyzer::with_tables(config.detection.clone()));
        if let Some(proxy) = &config.proxy {
            orchestrator = orchestrator.with_proxy(proxy.clone());
        }

        info!(
            %protocol,
            host = %target.host,
            port = target.port,
            candidates = candidates.len(),
            "session prepared"
        );
        Ok(Self {
            protocol,
            target,
            candidates,
            orchestrator,
        })
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// The target with its port resolved.
    pub fn target(&self) -> &TargetDescriptor {
        &self.target
    }

    /// Candidates in the order they will be tried.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.orchestrator.stop_handle()
    }

    pub fn run(self) -> SessionReport {
        let result = self.orchestrator.run(self.candidates);
        SessionReport::new(self.target, self.protocol, result)
    }
}

/// Dedup the wordlist, add predicted patterns, expand, rank, truncate.
fn build_candidates(
    config: &SessionConfig,
    target: &TargetDescriptor,
    wordlist: Vec<String>,
    generator: &mut CandidateGenerator,
) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut candidates: Vec<Candidate> = wordlist
        .into_iter()
        .filter(|w| !w.is_empty() && seen.insert(w.clone()))
        .map(Candidate::original)
        .collect();
    debug!(wordlist = candidates.len(), "deduplicated wordlist");

    let username = config.username_hints.then_some(target.username.as_str());
    if config.company.is_some() || username.is_some() {
        let predicted = generator.common_patterns(config.company.as_deref(), username);
        let before = candidates.len();
        candidates.extend(predicted.into_iter().filter(|c| seen.insert(c.value.clone())));
        debug!(added = candidates.len() - before, "added predicted patterns");
    }

    if let Some(max_size) = config.enhance {
        let values: Vec<String> = candidates.iter().map(|c| c.value.clone()).collect();
        let enhanced = generator.enhance_wordlist(&values, max_size);
        // Enhanced output leads with the (already unique) inputs in order.
        let kept = candidates.len().min(enhanced.len());
        candidates.truncate(kept);
        candidates.extend(enhanced.into_iter().skip(kept).map(Candidate::mutated));
        debug!(total = candidates.len(), "enhanced wordlist");
    }

    if config.generate {
        candidates = generator.expand(&candidates);
    }

    if config.rank {
        let ranker = match &config.model_path {
            Some(path) => CandidateRanker::load(path),
            None => CandidateRanker::new(),
        };
        candidates = ranker.rank(candidates);
    }

    if let Some(max) = config.engine.max_candidates {
        candidates.truncate(max);
    }
    candidates
}
