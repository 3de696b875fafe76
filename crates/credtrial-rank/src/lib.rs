pub mod error;
pub mod features;
pub mod heuristic;
pub mod model;
pub mod ranker;
pub mod split;

pub use error::{ModelError, TrainingError};
pub use heuristic::heuristic_score;
pub use model::NgramModel;
pub use ranker::{CandidateRanker, TrainingMetrics};
