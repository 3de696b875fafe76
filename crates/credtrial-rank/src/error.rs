//! Training and model persistence errors.

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("{candidates} candidates but {labels} labels")]
    LengthMismatch { candidates: usize, labels: usize },

    #[error("No training samples")]
    Empty,

    #[error("Test fraction must be within (0, 1), got {0}")]
    InvalidFraction(f64),

    #[error("Splitting {total} samples leaves an empty train or test set")]
    SplitTooSmall { total: usize },
}

/// Scoring backend failures. Never fatal: the ranker falls back to heuristics.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("No trained model loaded")]
    NotTrained,

    #[error("Model has not seen both classes")]
    SingleClass,

    #[error("Model I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model format error: {0}")]
    Format(#[from] serde_json::Error),
}
