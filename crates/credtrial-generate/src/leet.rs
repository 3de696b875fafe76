//! Character-class substitution tables ("leet").
//!
//! Tables are plain data: `(letter, replacements)` in lookup order.

/// Table used by positional mutation.
pub const MUTATION_SUBSTITUTIONS: &[(char, &[char])] = &[
    ('a', &['4', '@']),
    ('e', &['3']),
    ('i', &['1', '!']),
    ('o', &['0']),
    ('s', &['5', '$']),
    ('t', &['7', '+']),
    ('b', &['8']),
    ('g', &['9']),
    ('l', &['1', '|']),
    ('z', &['2']),
];

/// Table used by single-letter substitution on affixed combinations.
pub const COMBINATION_SUBSTITUTIONS: &[(char, &[char])] = &[
    ('a', &['4', '@']),
    ('e', &['3']),
    ('i', &['1', '!']),
    ('o', &['0']),
    ('s', &['5', '$']),
    ('t', &['7', '+']),
];

pub fn substitutions_for(table: &[(char, &'static [char])], letter: char) -> Option<&'static [char]> {
    table
        .iter()
        .find(|(l, _)| *l == letter)
        .map(|(_, replacements)| *replacements)
}

/// Lazy cartesian product of per-position substitution options.
///
/// Each position offers itself followed by its replacements; the last
/// position varies fastest. Callers `take(n)` a deterministic prefix
/// instead of materializing the whole product.
#[derive(Debug, Clone)]
pub struct LeetProduct {
    options: Vec<Vec<char>>,
    indices: Vec<usize>,
    done: bool,
}

impl LeetProduct {
    pub fn new(word: &str, table: &[(char, &'static [char])]) -> Self {
        let options: Vec<Vec<char>> = word
            .chars()
            .map(|c| {
                let mut opts = vec![c];
                if let Some(replacements) = substitutions_for(table, c) {
                    opts.extend_from_slice(replacements);
                }
                opts
            })
            .collect();
        let indices = vec![0; options.len()];
        Self {
            options,
            indices,
            done: false,
        }
    }

    /// Total size of the product (saturating).
    pub fn len_hint(&self) -> usize {
        self.options
            .iter()
            .map(Vec::len)
            .try_fold(1usize, |acc, n| acc.checked_mul(n))
            .unwrap_or(usize::MAX)
    }
}

impl Iterator for LeetProduct {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let item = self
            .indices
            .iter()
            .zip(&self.options)
            .map(|(&i, opts)| opts[i])
            .collect();

        // Odometer step.
        let mut pos = self.indices.len();
        loop {
            if pos == 0 {
                self.done = true;
                break;
            }
            pos -= 1;
            self.indices[pos] += 1;
            if self.indices[pos] < self.options[pos].len() {
                break;
            }
            self.indices[pos] = 0;
        }

        Some(item)
    }
}
