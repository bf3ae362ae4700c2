//! Shuffled train/dev/test partitioning.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

pub const TRAIN_PERCENT: usize = 80;
pub const DEV_PERCENT: usize = 10;

/// Three disjoint parts whose union is the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSplit<T> {
    pub train: Vec<T>,
    pub dev: Vec<T>,
    pub test: Vec<T>,
}

impl<T> DatasetSplit<T> {
    pub fn len(&self) -> usize {
        self.train.len() + self.dev.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(name, items)` in output order.
    pub fn parts(&self) -> [(&'static str, &[T]); 3] {
        [
            ("train", self.train.as_slice()),
            ("dev", self.dev.as_slice()),
            ("test", self.test.as_slice()),
        ]
    }
}

/// Part sizes for `n` items: train `floor(0.8n)`, dev `floor(0.1n)`, test the rest.
pub fn split_sizes(n: usize) -> (usize, usize, usize) {
    let train = n * TRAIN_PERCENT / 100;
    let dev = n * DEV_PERCENT / 100;
    (train, dev, n - train - dev)
}

/// Shuffle `items` with `rng` and cut it into train/dev/test.
pub fn split_dataset<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> DatasetSplit<T> {
    items.shuffle(rng);
    let (n_train, n_dev, _) = split_sizes(items.len());
    let mut dev = items.split_off(n_train);
    let test = dev.split_off(n_dev);
    DatasetSplit {
        train: items,
        dev,
        test,
    }
}

pub fn split_with_seed<T>(items: Vec<T>, seed: u64) -> DatasetSplit<T> {
    split_dataset(items, &mut StdRng::seed_from_u64(seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_hundred_items_split_evenly() {
        let split = split_with_seed((0..100).collect::<Vec<_>>(), 42);
        assert_eq!(
            (split.train.len(), split.dev.len(), split.test.len()),
            (80, 10, 10)
        );
    }

    #[test]
    fn test_small_inputs() {
        assert_eq!(split_sizes(0), (0, 0, 0));
        assert_eq!(split_sizes(1), (0, 0, 1));
        assert_eq!(split_sizes(9), (7, 0, 2));
        assert_eq!(split_sizes(11), (8, 1, 2));
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_with_seed((0..37).collect::<Vec<_>>(), 5);
        let b = split_with_seed((0..37).collect::<Vec<_>>(), 5);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_parts_are_disjoint_and_complete(n in 0usize..400, seed in any::<u64>()) {
            let split = split_with_seed((0..n).collect::<Vec<_>>(), seed);
            let (train, dev, test) = split_sizes(n);
            prop_assert_eq!(split.train.len(), train);
            prop_assert_eq!(split.dev.len(), dev);
            prop_assert_eq!(split.test.len(), test);

            let mut all: Vec<usize> = split
                .train
                .iter()
                .chain(&split.dev)
                .chain(&split.test)
                .copied()
                .collect();
            all.sort_unstable();
            prop_assert_eq!(all, (0..n).collect::<Vec<_>>());
        }
    }
}
