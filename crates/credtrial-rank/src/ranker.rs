//! Candidate ranking by estimated likelihood of validity.
//!
//! Two scoring paths:
//! 1. A trained [`NgramModel`] when one is loaded and usable.
//! 2. [`heuristic_score`] otherwise, or whenever model scoring fails.
//!
//! Ranking is a stable descending sort, so equal scores keep input order.

use std::path::Path;

use credtrial_types::Candidate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ModelError, TrainingError};
use crate::heuristic::heuristic_score;
use crate::model::NgramModel;
use crate::split::{train_test_split, SPLIT_SEED};

/// Evaluation fraction used when the caller has no preference.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Metrics from one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    /// Share of held-out samples classified correctly.
    pub accuracy: f64,
    pub train_size: usize,
    pub test_size: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CandidateRanker {
    model: Option<NgramModel>,
}

impl CandidateRanker {
    /// Heuristic-only ranker.
    pub fn new() -> Self {
        Self { model: None }
    }

    pub fn with_model(model: NgramModel) -> Self {
        Self { model: Some(model) }
    }

    /// Load a persisted model. A missing or corrupt file yields a
    /// heuristic-only ranker instead of an error.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match NgramModel::load(path) {
            Ok(model) => {
                info!(path = %path.display(), vocabulary = model.vocabulary_size(), "loaded ranking model");
                Self::with_model(model)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ranking model unavailable, using heuristic scoring");
                Self::new()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let model = self.model.as_ref().ok_or(ModelError::NotTrained)?;
        model.save(path.as_ref())?;
        info!(path = %path.as_ref().display(), "saved ranking model");
        Ok(())
    }

    /// True when a trained model is loaded (it may still be unusable).
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&NgramModel> {
        self.model.as_ref()
    }

    /// Fit a new model on labelled candidates, holding out `test_fraction`
    /// for evaluation. On error the current model is left untouched.
    pub fn train(
        &mut self,
        candidates: &[String],
        labels: &[bool],
        test_fraction: f64,
    ) -> Result<TrainingMetrics, TrainingError> {
        if candidates.len() != labels.len() {
            return Err(TrainingError::LengthMismatch {
                candidates: candidates.len(),
                labels: labels.len(),
            });
        }
        if candidates.is_empty() {
            return Err(TrainingError::Empty);
        }
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(TrainingError::InvalidFraction(test_fraction));
        }

        let samples: Vec<(&str, bool)> = candidates
            .iter()
            .map(String::as_str)
            .zip(labels.iter().copied())
            .collect();
        let (train, test) = train_test_split(&samples, test_fraction, SPLIT_SEED);
        if train.is_empty() || test.is_empty() {
            return Err(TrainingError::SplitTooSmall {
                total: samples.len(),
            });
        }

        let model = NgramModel::fit(&train);
        let correct = test
            .iter()
            .filter(|(text, label)| model.predict(text) == *label)
            .count();
        let metrics = TrainingMetrics {
            accuracy: correct as f64 / test.len() as f64,
            train_size: train.len(),
            test_size: test.len(),
        };

        if !model.is_usable() {
            warn!("training data covers a single class; scores will use the heuristic");
        }
        info!(accuracy = metrics.accuracy, train = metrics.train_size, test = metrics.test_size, "trained ranking model");
        self.model = Some(model);
        Ok(metrics)
    }

    /// Score one candidate in `[0, 1]`.
    pub fn score(&self, candidate: &str) -> f64 {
        match &self.model {
            Some(model) => match model.probability(candidate) {
                Ok(p) => p,
                Err(_) => heuristic_score(candidate),
            },
            None => heuristic_score(candidate),
        }
    }

    /// Score every candidate (in parallel) and sort descending, stable.
    /// Each returned candidate carries its score.
    pub fn rank(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        if let Some(model) = &self.model {
            if !model.is_usable() {
                debug!("ranking model unusable, falling back to heuristic scores");
            }
        }

        let scores: Vec<f64> = candidates
            .par_iter()
            .map(|c| self.score(&c.value))
            .collect();

        let mut scored: Vec<(Candidate, f64)> = candidates.into_iter().zip(scores).collect();
        // sort_by is stable: ties keep their input order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        debug!(candidates = scored.len(), "ranked candidates");
        scored
            .into_iter()
            .map(|(candidate, score)| candidate.with_score(score))
            .collect()
    }

    /// Rank plain strings, returning `(candidate, score)` pairs.
    pub fn rank_strings(&self, candidates: &[String]) -> Vec<(String, f64)> {
        self.rank(candidates.iter().cloned().map(Candidate::original).collect())
            .into_iter()
            .map(|c| {
                let score = c.score.unwrap_or_default();
                (c.value, score)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credtrial_types::Provenance;

    #[test]
    fn test_heuristic_ranking_is_stable() {
        let ranker = CandidateRanker::new();
        let input = vec![
            Candidate::original("a"),
            Candidate::original("bb"),
            Candidate::mutated("bb"),
        ];
        let ranked = ranker.rank(input);

        let order: Vec<(&str, Provenance)> = ranked
            .iter()
            .map(|c| (c.value.as_str(), c.provenance))
            .collect();
        assert_eq!(
            order,
            vec![
                ("bb", Provenance::Original),
                ("bb", Provenance::Mutated),
                ("a", Provenance::Original),
            ]
        );
    }

    #[test]
    fn test_rank_assigns_scores() {
        let ranker = CandidateRanker::new();
        let ranked = ranker.rank(vec![Candidate::original("Secret99!")]);
        assert_eq!(ranked[0].score, Some(heuristic_score("Secret99!")));
    }

    #[test]
    fn test_rank_empty() {
        assert!(CandidateRanker::new().rank(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_class_model_scores_heuristically() {
        let ranker = CandidateRanker::with_model(NgramModel::fit(&[("abc", true), ("abd", true)]));
        assert_eq!(ranker.score("Hello1!"), heuristic_score("Hello1!"));
    }

    #[test]
    fn test_save_without_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = CandidateRanker::new().save(dir.path().join("model.json"));
        assert!(matches!(result, Err(ModelError::NotTrained)));
    }
}
