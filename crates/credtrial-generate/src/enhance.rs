//! Sampled wordlist enhancement under a size cap.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::clock::Clock;
use crate::combinations::{combinations, DEFAULT_AFFIXES};

/// Most inputs expanded by one enhancement pass.
pub const MAX_ENHANCE_SAMPLE: usize = 100;

/// Grow a wordlist with combinations of a random sample of its entries.
///
/// The result starts with the deduplicated input, then appends the new
/// combinations of each sampled entry until `max_size` is reached, and is
/// finally cut to `max_size`. Which entries get expanded depends on `rng`;
/// with a seeded RNG the output is reproducible.
pub fn enhance_wordlist<R>(
    candidates: &[String],
    max_size: usize,
    rng: &mut R,
    clock: &dyn Clock,
) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let mut seen: HashSet<String> = HashSet::with_capacity(candidates.len());
    let mut enhanced: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if seen.insert(candidate.clone()) {
            enhanced.push(candidate.clone());
        }
    }

    let sample_size = candidates.len().min(MAX_ENHANCE_SAMPLE);
    let sample: Vec<&String> = candidates.choose_multiple(rng, sample_size).collect();

    for base in sample {
        if enhanced.len() >= max_size {
            break;
        }
        for combo in combinations(base, DEFAULT_AFFIXES, clock) {
            if seen.insert(combo.clone()) {
                enhanced.push(combo);
            }
        }
    }

    enhanced.truncate(max_size);
    debug!(
        input = candidates.len(),
        output = enhanced.len(),
        "enhanced wordlist"
    );
    enhanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::rng::sampling_rng;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_input_is_kept_first() {
        let input = words(&["alpha", "beta"]);
        let out = enhance_wordlist(&input, 1000, &mut sampling_rng(Some(1)), &FixedClock(2026));
        assert_eq!(&out[..2], &["alpha", "beta"]);
        assert!(out.len() > 2);
    }

    #[test]
    fn test_cap_is_respected() {
        let input = words(&["alpha", "beta", "gamma"]);
        let out = enhance_wordlist(&input, 10, &mut sampling_rng(Some(1)), &FixedClock(2026));
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn test_cap_below_input_size_truncates_input() {
        let input = words(&["a1", "b2", "c3", "d4"]);
        let out = enhance_wordlist(&input, 2, &mut sampling_rng(Some(1)), &FixedClock(2026));
        assert_eq!(out, vec!["a1", "b2"]);
    }

    #[test]
    fn test_empty_input() {
        let out = enhance_wordlist(&[], 10, &mut sampling_rng(Some(1)), &FixedClock(2026));
        assert!(out.is_empty());
    }
}
