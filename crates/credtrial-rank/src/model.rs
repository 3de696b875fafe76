//! Multinomial naive Bayes over character n-grams.
//!
//! Class 1 = "valid credential", class 0 = "invalid". Laplace smoothing;
//! n-grams never seen in training are ignored at prediction time.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::features::ngram_counts;

/// Default additive smoothing.
pub const DEFAULT_ALPHA: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NgramModel {
    alpha: f64,
    /// Training documents per class.
    class_docs: [u64; 2],
    /// Total n-gram occurrences per class.
    class_tokens: [u64; 2],
    /// N-gram occurrences per class.
    counts: [BTreeMap<String, u64>; 2],
    vocabulary: BTreeSet<String>,
}

impl NgramModel {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            class_docs: [0; 2],
            class_tokens: [0; 2],
            counts: [BTreeMap::new(), BTreeMap::new()],
            vocabulary: BTreeSet::new(),
        }
    }

    /// Fit a fresh model on `(candidate, is_valid)` samples.
    pub fn fit(samples: &[(&str, bool)]) -> Self {
        let mut model = Self::new(DEFAULT_ALPHA);
        for (text, label) in samples {
            model.observe(text, *label);
        }
        model
    }

    fn observe(&mut self, text: &str, label: bool) {
        let class = label as usize;
        self.class_docs[class] += 1;
        for (gram, n) in ngram_counts(text) {
            *self.counts[class].entry(gram.clone()).or_insert(0) += n;
            self.class_tokens[class] += n;
            self.vocabulary.insert(gram);
        }
    }

    /// True once both classes have been observed.
    pub fn is_usable(&self) -> bool {
        self.class_docs[0] > 0 && self.class_docs[1] > 0
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Posterior probability that `text` belongs to the valid class.
    pub fn probability(&self, text: &str) -> Result<f64, ModelError> {
        if !self.is_usable() {
            return Err(ModelError::SingleClass);
        }
        let l0 = self.log_joint(text, 0);
        let l1 = self.log_joint(text, 1);
        // p1 = e^l1 / (e^l0 + e^l1), computed without overflow.
        Ok(1.0 / (1.0 + (l0 - l1).exp()))
    }

    /// Most likely class; a model that only saw one class always predicts it.
    pub fn predict(&self, text: &str) -> bool {
        match self.class_docs {
            [_, 0] => false,
            [0, _] => true,
            _ => self.probability(text).map(|p| p > 0.5).unwrap_or(false),
        }
    }

    fn log_joint(&self, text: &str, class: usize) -> f64 {
        let total_docs = (self.class_docs[0] + self.class_docs[1]) as f64;
        let prior = (self.class_docs[class] as f64 / total_docs).ln();

        let vocab = self.vocabulary.len() as f64;
        let denominator = self.class_tokens[class] as f64 + self.alpha * vocab;

        let likelihood: f64 = ngram_counts(text)
            .into_iter()
            .filter(|(gram, _)| self.vocabulary.contains(gram))
            .map(|(gram, n)| {
                let count = self.counts[class].get(&gram).copied().unwrap_or(0) as f64;
                n as f64 * ((count + self.alpha) / denominator).ln()
            })
            .sum();

        prior + likelihood
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_model() -> NgramModel {
        NgramModel::fit(&[
            ("Summer2024!", true),
            ("Winter2023!", true),
            ("Spring2025!", true),
            ("aaaaaa", false),
            ("zzzzzz", false),
            ("qqqqqq", false),
        ])
    }

    #[test]
    fn test_probability_in_unit_interval() {
        let model = toy_model();
        for text in ["Autumn2024!", "aaaa", "", "完全に未知"] {
            let p = model.probability(text).unwrap();
            assert!((0.0..=1.0).contains(&p), "{text}: {p}");
        }
    }

    #[test]
    fn test_learns_class_features() {
        let model = toy_model();
        let good = model.probability("Summer2022!").unwrap();
        let bad = model.probability("aaaaaaaa").unwrap();
        assert!(good > 0.5, "{good}");
        assert!(bad < 0.5, "{bad}");
        assert!(model.predict("Summer2022!"));
        assert!(!model.predict("aaaaaaaa"));
    }

    #[test]
    fn test_unknown_features_fall_back_to_prior() {
        let model = NgramModel::fit(&[("ab", true), ("cd", false), ("ef", false), ("gh", false)]);
        let p = model.probability("xy").unwrap();
        assert!((p - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_single_class_model_cannot_score() {
        let model = NgramModel::fit(&[("abc", false), ("def", false)]);
        assert!(!model.is_usable());
        assert!(matches!(model.probability("abc"), Err(ModelError::SingleClass)));
        assert!(!model.predict("abc"));
    }
}
