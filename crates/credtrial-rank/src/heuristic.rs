//! Model-free scoring from length and character classes.

/// Length at which the length component saturates.
pub const LENGTH_SATURATION: f64 = 12.0;
pub const LENGTH_WEIGHT: f64 = 0.4;
/// Added once per character class present.
pub const CLASS_WEIGHT: f64 = 0.15;

/// Fallback score in `[0, 1]` from length and character-class variety.
pub fn heuristic_score(candidate: &str) -> f64 {
    let len = candidate.chars().count() as f64;
    let length_score = (len / LENGTH_SATURATION).min(1.0) * LENGTH_WEIGHT;

    let classes = [
        candidate.chars().any(|c| c.is_ascii_uppercase()),
        candidate.chars().any(|c| c.is_ascii_lowercase()),
        candidate.chars().any(|c| c.is_ascii_digit()),
        candidate.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let class_score = classes.iter().filter(|&&present| present).count() as f64 * CLASS_WEIGHT;

    length_score + class_score
}
