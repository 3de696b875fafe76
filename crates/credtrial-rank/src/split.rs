//! Deterministic train/test split.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed used for every split so training runs are repeatable.
pub const SPLIT_SEED: u64 = 42;

/// Shuffle `items` with a seeded RNG and cut off `ceil(n * test_fraction)`
/// items as the test set. Returns `(train, test)`.
pub fn train_test_split<T: Clone>(items: &[T], test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut indices: Vec<usize> = (0..items.len()).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((items.len() as f64) * test_fraction).ceil() as usize;
    let test_len = test_len.min(items.len());

    let test = indices[..test_len].iter().map(|&i| items[i].clone()).collect();
    let train = indices[test_len..].iter().map(|&i| items[i].clone()).collect();
    (train, test)
}
