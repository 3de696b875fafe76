//! Single-word mutations: case variants, reversal, doubling and capped leet.

use tracing::debug;

use crate::leet::{LeetProduct, MUTATION_SUBSTITUTIONS};
use crate::text::{capitalize, dedup_preserving_order, reverse, title};

/// Cap on substitution products taken per base word.
pub const MAX_LEET_PRODUCTS: usize = 100;

/// Case variants, reversal, doubling and positional leet substitution of `base`.
///
/// The substitution product runs over the lower-cased base and is cut to
/// its first [`MAX_LEET_PRODUCTS`] entries in generation order.
pub fn mutations(base: &str) -> Vec<String> {
    let lower = base.to_lowercase();

    let mut out = vec![
        lower.clone(),
        base.to_uppercase(),
        capitalize(base),
        title(base),
        reverse(base),
        format!("{base}{base}"),
    ];

    let product = LeetProduct::new(&lower, MUTATION_SUBSTITUTIONS);
    let full_size = product.len_hint();
    out.extend(product.take(MAX_LEET_PRODUCTS));

    let out = dedup_preserving_order(out);
    debug!(
        variants = out.len(),
        product_size = full_size,
        "generated mutations"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutations_of_short_word() {
        assert_eq!(
            mutations("abc"),
            vec!["abc", "ABC", "Abc", "cba", "abcabc", "a8c", "4bc", "48c", "@bc", "@8c"]
        );
    }

    #[test]
    fn test_mutations_are_deterministic() {
        assert_eq!(mutations("Sesame"), mutations("Sesame"));
    }

    #[test]
    fn test_product_is_truncated_to_prefix() {
        // 3^5 = 243 products; only the first 100 are taken.
        let out = mutations("aaaaa");
        // Fixed variants: aaaaa, AAAAA, Aaaaa, aaaaaaaaaa (title/reverse collapse).
        // Products: 100, first one ("aaaaa") is a duplicate.
        assert_eq!(out.len(), 4 + 99);
        assert_eq!(out.last().map(String::as_str), Some("4a@aa"));
        assert!(!out.contains(&"4a@a4".to_string()));
    }
}
