use credtrial_rank::error::TrainingError;
use credtrial_rank::heuristic::heuristic_score;
use credtrial_rank::ranker::{CandidateRanker, DEFAULT_TEST_FRACTION};
use credtrial_types::Candidate;

/// Labelled corpus: seasonal passwords are "valid", keyboard mash is not.
fn corpus() -> (Vec<String>, Vec<bool>) {
    let mut candidates = Vec::new();
    let mut labels = Vec::new();
    for season in ["Summer", "Winter", "Spring", "Autumn"] {
        for year in 2019..2025 {
            candidates.push(format!("{season}{year}!"));
            labels.push(true);
        }
    }
    for mash in ["qwqwqw", "zxzxzx", "asdasd", "qazqaz", "wsxwsx", "edcedc"] {
        for n in 0..4 {
            candidates.push(format!("{mash}{}", "q".repeat(n)));
            labels.push(false);
        }
    }
    (candidates, labels)
}

#[test]
fn test_train_reports_metrics() {
    let (candidates, labels) = corpus();
    let mut ranker = CandidateRanker::new();
    let metrics = ranker.train(&candidates, &labels, DEFAULT_TEST_FRACTION).unwrap();

    assert_eq!(metrics.train_size + metrics.test_size, candidates.len());
    assert_eq!(metrics.test_size, 10); // ceil(48 * 0.2)
    assert!(metrics.accuracy >= 0.8, "accuracy {}", metrics.accuracy);
    assert!(ranker.has_model());
}

#[test]
fn test_trained_model_prefers_learned_shape() {
    let (candidates, labels) = corpus();
    let mut ranker = CandidateRanker::new();
    ranker.train(&candidates, &labels, DEFAULT_TEST_FRACTION).unwrap();

    let ranked = ranker.rank(vec![
        Candidate::original("asdasdasd"),
        Candidate::original("Summer2026!"),
    ]);
    assert_eq!(ranked[0].value, "Summer2026!");
    assert!(ranked[0].score.unwrap() > ranked[1].score.unwrap());
}

#[test]
fn test_mismatched_lengths_rejected_without_mutation() {
    let mut ranker = CandidateRanker::new();
    let result = ranker.train(&["a".to_string(), "b".to_string()], &[true], DEFAULT_TEST_FRACTION);
    assert!(matches!(
        result,
        Err(TrainingError::LengthMismatch {
            candidates: 2,
            labels: 1
        })
    ));
    assert!(!ranker.has_model());
}

#[test]
fn test_failed_training_keeps_previous_model() {
    let (candidates, labels) = corpus();
    let mut ranker = CandidateRanker::new();
    ranker.train(&candidates, &labels, DEFAULT_TEST_FRACTION).unwrap();
    let before = ranker.model().cloned();

    assert!(ranker.train(&[], &[], DEFAULT_TEST_FRACTION).is_err());
    assert!(ranker.train(&candidates, &labels, 1.5).is_err());
    assert_eq!(ranker.model().cloned(), before);
}

#[test]
fn test_split_too_small() {
    let mut ranker = CandidateRanker::new();
    let result = ranker.train(&["only".to_string()], &[true], DEFAULT_TEST_FRACTION);
    assert!(matches!(result, Err(TrainingError::SplitTooSmall { total: 1 })));
}

#[test]
fn test_save_and_load_round_trip() {
    let (candidates, labels) = corpus();
    let mut ranker = CandidateRanker::new();
    ranker.train(&candidates, &labels, DEFAULT_TEST_FRACTION).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models").join("ranker.json");
    ranker.save(&path).unwrap();

    let loaded = CandidateRanker::load(&path);
    assert!(loaded.has_model());
    assert_eq!(loaded.score("Winter2030!"), ranker.score("Winter2030!"));
}

#[test]
fn test_corrupt_model_degrades_to_heuristic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, b"{ not a model").unwrap();

    let ranker = CandidateRanker::load(&path);
    assert!(!ranker.has_model());
    assert_eq!(ranker.score("Abc123!"), heuristic_score("Abc123!"));
}

#[test]
fn test_missing_model_degrades_to_heuristic() {
    let ranker = CandidateRanker::load("/nonexistent/credtrial/model.json");
    assert!(!ranker.has_model());
}

#[test]
fn test_rank_strings_sorted_descending() {
    let ranker = CandidateRanker::new();
    let input: Vec<String> = ["abc", "Abc123!x", "abcdef"].iter().map(|s| s.to_string()).collect();
    let ranked = ranker.rank_strings(&input);

    assert_eq!(ranked[0].0, "Abc123!x");
    assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
}
