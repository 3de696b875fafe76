//! Affix, leet and year combinations of a base word.

use tracing::debug;

use crate::clock::Clock;
use crate::leet::COMBINATION_SUBSTITUTIONS;
use crate::text::{capitalize, dedup_preserving_order};

/// Affixes used when the caller supplies none.
pub const DEFAULT_AFFIXES: &[&str] = &["123", "!", "2025"];

/// Years before the current year included in the rolling window.
pub const YEARS_BEFORE: i32 = 5;
/// Years after the current year included in the rolling window.
pub const YEARS_AFTER: i32 = 1;

/// Affixed, leet-substituted and year-affixed variants of `base`.
///
/// Output order: suffixes, prefixes, single-letter substitutions of those,
/// then `base+year` / `year+base` over `[year-5, year+1]`. Duplicates are
/// dropped keeping the first occurrence. `base` itself is not included.
pub fn combinations<S: AsRef<str>>(base: &str, affixes: &[S], clock: &dyn Clock) -> Vec<String> {
    let capitalized = capitalize(base);
    let mut combos = Vec::with_capacity(affixes.len() * 4);

    for affix in affixes {
        let affix = affix.as_ref();
        combos.push(format!("{base}{affix}"));
        combos.push(format!("{capitalized}{affix}"));
    }
    for affix in affixes {
        let affix = affix.as_ref();
        combos.push(format!("{affix}{base}"));
        combos.push(format!("{affix}{capitalized}"));
    }

    let substituted: Vec<String> = combos.iter().flat_map(|c| single_letter_leet(c)).collect();
    combos.extend(substituted);

    let year = clock.current_year();
    for y in (year - YEARS_BEFORE)..=(year + YEARS_AFTER) {
        combos.push(format!("{base}{y}"));
        combos.push(format!("{y}{base}"));
    }

    let combos = dedup_preserving_order(combos);
    debug!(variants = combos.len(), "generated combinations");
    combos
}

/// Replace every occurrence of one letter at a time; letters are never
/// combined within a single variant.
fn single_letter_leet(combo: &str) -> Vec<String> {
    let lower = combo.to_lowercase();
    let mut out = Vec::new();
    for (letter, replacements) in COMBINATION_SUBSTITUTIONS {
        if lower.contains(*letter) {
            for replacement in replacements.iter() {
                out.push(lower.replace(*letter, &replacement.to_string()));
            }
        }
    }
    out
}
