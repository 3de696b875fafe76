use std::collections::BTreeMap;

/// Smallest and largest n-gram length extracted.
pub const NGRAM_RANGE: (usize, usize) = (2, 3);

/// Lower-cased character bigram and trigram counts.
pub fn ngram_counts(text: &str) -> BTreeMap<String, u64> {
    let chars: Vec<char> = text.to_lowercase().chars().collect();
    let mut counts = BTreeMap::new();
    for n in NGRAM_RANGE.0..=NGRAM_RANGE.1 {
        for window in chars.windows(n) {
            *counts.entry(window.iter().collect()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bigrams_and_trigrams() {
        let counts = ngram_counts("AbAb");
        assert_eq!(counts.get("ab"), Some(&2));
        assert_eq!(counts.get("ba"), Some(&1));
        assert_eq!(counts.get("aba"), Some(&1));
        assert_eq!(counts.get("bab"), Some(&1));
        assert_eq!(counts.len(), 4);
    }

    #[test]
    fn test_short_input_has_no_features() {
        assert!(ngram_counts("x").is_empty());
        assert!(ngram_counts("").is_empty());
    }
}
