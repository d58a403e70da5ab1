//! Deterministic row splitting.
//!
//! Two splitters, both seeded: a one-shot train/held-out partition for
//! scoring a fit, and a k-fold rotation for ranking search candidates.
//! Row indices are split, never the data itself; callers gather rows with
//! [`crate::dataset::PredictorTable::select_rows`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};

/// Shuffles `0..n_rows` with a seeded generator and carves off
/// `floor(n_rows * test_fraction)` rows as the held-out partition.
///
/// Both partitions must come out non-empty, otherwise this fails with
/// [`Error::InsufficientData`]. At the usual fraction of 0.2 that makes
/// five rows the minimum viable table.
pub fn train_test_split(
    n_rows: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(Error::InvalidParameter(format!(
            "held-out fraction must lie strictly between 0 and 1, got {test_fraction}"
        )));
    }
    let n_held_out = (n_rows as f64 * test_fraction).floor() as usize;
    let n_train = n_rows - n_held_out;
    if n_held_out == 0 || n_train == 0 {
        return Err(Error::InsufficientData(format!(
            "{n_rows} rows cannot fill both partitions at held-out fraction {test_fraction}"
        )));
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let held_out = indices.split_off(n_train);
    Ok((indices, held_out))
}

/// K-fold splitter with a deterministic LCG shuffle.
#[derive(Clone, Debug)]
pub struct KFold {
    n_splits: usize,
    seed: u64,
}

impl KFold {
    pub fn new(n_splits: usize, seed: u64) -> Self {
        Self { n_splits, seed }
    }

    /// Generates `(train, validation)` index pairs, one per fold.
    ///
    /// Validation folds take `n_samples / n_splits` rows each, with the
    /// remainder spread over the leading folds. Fails with
    /// [`Error::InsufficientData`] when there are fewer rows than folds.
    pub fn split(&self, n_samples: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if self.n_splits < 2 {
            return Err(Error::InvalidParameter(format!(
                "cross-validation needs at least 2 folds, got {}",
                self.n_splits
            )));
        }
        if n_samples < self.n_splits {
            return Err(Error::InsufficientData(format!(
                "{n_samples} rows cannot be split into {} folds",
                self.n_splits
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        // LCG shuffle keeps fold assignment reproducible across runs
        let mut rng_state = self.seed;
        for i in (1..n_samples).rev() {
            rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let j = (rng_state >> 33) as usize % (i + 1);
            indices.swap(i, j);
        }

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for i in 0..self.n_splits {
            let extra = usize::from(i < remainder);
            let end = start + fold_size + extra;

            let validation: Vec<usize> = indices[start..end].to_vec();
            let train: Vec<usize> = indices[..start]
                .iter()
                .chain(indices[end..].iter())
                .copied()
                .collect();

            folds.push((train, validation));
            start = end;
        }
        Ok(folds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    // ---- Train/Held-Out Tests ----

    #[test]
    fn test_split_sizes_use_floor() {
        let (train, held_out) = train_test_split(10, 0.2, 42).expect("split should succeed");
        assert_eq!(train.len(), 8);
        assert_eq!(held_out.len(), 2);

        let (train, held_out) = train_test_split(5, 0.2, 42).expect("split should succeed");
        assert_eq!(train.len(), 4);
        assert_eq!(held_out.len(), 1);
    }

    #[test]
    fn test_split_partitions_are_disjoint_and_complete() {
        let (train, held_out) = train_test_split(23, 0.3, 7).expect("split should succeed");
        let mut all: BTreeSet<usize> = train.iter().copied().collect();
        for idx in &held_out {
            assert!(all.insert(*idx), "index {idx} appears in both partitions");
        }
        assert_eq!(all, (0..23).collect());
    }

    #[test]
    fn test_split_too_few_rows() {
        let err = train_test_split(4, 0.2, 42).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));

        let err = train_test_split(0, 0.2, 42).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));

        // a fraction that would swallow every row
        let err = train_test_split(3, 0.99, 42).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }

    #[test]
    fn test_split_fraction_bounds() {
        assert!(matches!(
            train_test_split(10, 0.0, 42),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            train_test_split(10, 1.0, 42),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_split_is_seeded() {
        let a = train_test_split(50, 0.2, 42).expect("split should succeed");
        let b = train_test_split(50, 0.2, 42).expect("split should succeed");
        assert_eq!(a, b);

        let c = train_test_split(50, 0.2, 43).expect("split should succeed");
        assert_ne!(a, c);
    }

    // ---- KFold Tests ----

    #[test]
    fn test_kfold_covers_all_rows() {
        let folds = KFold::new(3, 42).split(10).expect("split should succeed");
        assert_eq!(folds.len(), 3);

        let mut seen = BTreeSet::new();
        for (train, validation) in &folds {
            assert_eq!(train.len() + validation.len(), 10);
            for idx in validation {
                assert!(seen.insert(*idx), "index {idx} validated twice");
            }
        }
        assert_eq!(seen, (0..10).collect());
    }

    #[test]
    fn test_kfold_spreads_remainder() {
        let folds = KFold::new(3, 42).split(10).expect("split should succeed");
        let sizes: Vec<usize> = folds.iter().map(|(_, v)| v.len()).collect();
        assert_eq!(sizes, [4, 3, 3]);
    }

    #[test]
    fn test_kfold_more_folds_than_rows() {
        let err = KFold::new(18, 42).split(5).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }

    #[test]
    fn test_kfold_needs_two_folds() {
        let err = KFold::new(1, 42).split(10).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_kfold_is_seeded() {
        let a = KFold::new(4, 42).split(20).expect("split should succeed");
        let b = KFold::new(4, 42).split(20).expect("split should succeed");
        assert_eq!(a, b);

        let c = KFold::new(4, 99).split(20).expect("split should succeed");
        assert_ne!(a, c);
    }
}
