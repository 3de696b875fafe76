//! Candidate generation front-end.
//!
//! Bundles the injected clock and sampling RNG so callers get reproducible
//! expansion from a single seed.

use std::collections::HashSet;

use credtrial_types::Candidate;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::combinations::{combinations, DEFAULT_AFFIXES};
use crate::enhance::enhance_wordlist;
use crate::mutations::mutations;
use crate::patterns::common_patterns;
use crate::rng::sampling_rng;

pub struct CandidateGenerator {
    clock: Box<dyn Clock>,
    rng: ChaCha8Rng,
    affixes: Vec<String>,
}

impl CandidateGenerator {
    pub fn new(clock: impl Clock + 'static, seed: Option<u64>) -> Self {
        Self {
            clock: Box::new(clock),
            rng: sampling_rng(seed),
            affixes: DEFAULT_AFFIXES.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Generator on the system clock.
    pub fn system(seed: Option<u64>) -> Self {
        Self::new(SystemClock, seed)
    }

    /// Replace the affixes used by [`Self::combinations`] and [`Self::expand`].
    pub fn with_affixes(mut self, affixes: Vec<String>) -> Self {
        self.affixes = affixes;
        self
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn mutations(&self, base: &str) -> Vec<String> {
        mutations(base)
    }

    pub fn combinations(&self, base: &str) -> Vec<String> {
        combinations(base, &self.affixes, self.clock.as_ref())
    }

    /// Common-pattern candidates, tagged [`credtrial_types::Provenance::Predicted`].
    pub fn common_patterns(&self, company: Option<&str>, username: Option<&str>) -> Vec<Candidate> {
        common_patterns(company, username, self.clock.as_ref())
            .into_iter()
            .map(Candidate::predicted)
            .collect()
    }

    pub fn enhance_wordlist(&mut self, candidates: &[String], max_size: usize) -> Vec<String> {
        enhance_wordlist(candidates, max_size, &mut self.rng, self.clock.as_ref())
    }

    /// Each input followed by its new combinations, deduplicated across the
    /// whole output. Inputs keep their provenance; additions are `Mutated`.
    pub fn expand(&self, candidates: &[Candidate]) -> Vec<Candidate> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut out = Vec::with_capacity(candidates.len() * 8);

        for candidate in candidates {
            if seen.insert(candidate.value.clone()) {
                out.push(candidate.clone());
            }
            for combo in self.combinations(&candidate.value) {
                if seen.insert(combo.clone()) {
                    out.push(Candidate::mutated(combo));
                }
            }
        }

        info!(
            input = candidates.len(),
            output = out.len(),
            "expanded candidate list"
        );
        out
    }
}
