//! Seeded Bernoulli train/test partitioning.
//!
//! Each record is independently assigned to the test subset with
//! probability `test_fraction`, so subset sizes vary with the seed rather
//! than being a fixed slice. Runs are reproducible by default: callers pick
//! a fixed seed unless they explicitly opt in to OS entropy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::Dataset;
use crate::errors::{PipelineError, Result};

/// Seed used when the caller does not override it.
pub const DEFAULT_SEED: u64 = 42;

/// Seed policy for the partition. `Entropy` is the explicit opt-in to a
/// non-reproducible split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitSeed {
    Fixed(u64),
    Entropy,
}

impl Default for SplitSeed {
    fn default() -> Self {
        SplitSeed::Fixed(DEFAULT_SEED)
    }
}

/// Partition a dataset into (train, test) subsets.
///
/// Guarantees: the subsets are disjoint, their multiset union is the input
/// dataset, and both preserve source order. Identical (dataset, fraction,
/// fixed seed) inputs produce identical partitions.
pub fn split(dataset: &Dataset, test_fraction: f64, seed: SplitSeed) -> Result<(Dataset, Dataset)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(PipelineError::InvalidFraction(test_fraction));
    }

    let mut rng = match seed {
        SplitSeed::Fixed(value) => StdRng::seed_from_u64(value),
        SplitSeed::Entropy => StdRng::from_entropy(),
    };

    let mut train = Vec::new();
    let mut test = Vec::new();

    for record in dataset.records() {
        if rng.gen_bool(test_fraction) {
            test.push(record.clone());
        } else {
            train.push(record.clone());
        }
    }

    Ok((Dataset::new(train), Dataset::new(test)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::PatientRecord;

    fn dataset(n: usize) -> Dataset {
        let records = (0..n)
            .map(|i| PatientRecord {
                id: i as u32,
                pregnancies: i as f64,
                glucose: i as f64,
                blood_pressure: i as f64,
                skin_thickness: i as f64,
                insulin: i as f64,
                bmi: i as f64,
                diabetes_pedigree: i as f64,
                age: i as f64,
                diabetes_value: i as f64,
            })
            .collect();
        Dataset::new(records)
    }

    #[test]
    fn test_sizes_sum_to_total() {
        let data = dataset(100);
        for fraction in [0.1, 0.2, 0.5, 0.9] {
            let (train, test) = split(&data, fraction, SplitSeed::Fixed(7)).unwrap();
            assert_eq!(train.len() + test.len(), data.len());
        }
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let data = dataset(50);
        let (train, test) = split(&data, 0.3, SplitSeed::Fixed(11)).unwrap();

        let mut seen: Vec<u32> = train
            .records()
            .iter()
            .chain(test.records())
            .map(|r| r.id)
            .collect();
        seen.sort_unstable();

        let expected: Vec<u32> = (0..50).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_subsets_preserve_source_order() {
        let data = dataset(40);
        let (train, test) = split(&data, 0.4, SplitSeed::Fixed(3)).unwrap();

        for subset in [&train, &test] {
            let ids: Vec<u32> = subset.records().iter().map(|r| r.id).collect();
            let mut sorted = ids.clone();
            sorted.sort_unstable();
            assert_eq!(ids, sorted, "subset must keep source order");
        }
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let data = dataset(80);
        let (train1, test1) = split(&data, 0.2, SplitSeed::Fixed(42)).unwrap();
        let (train2, test2) = split(&data, 0.2, SplitSeed::Fixed(42)).unwrap();

        assert_eq!(train1, train2);
        assert_eq!(test1, test2);
    }

    #[test]
    fn test_different_seeds_may_differ() {
        let data = dataset(200);
        let (train1, _) = split(&data, 0.5, SplitSeed::Fixed(1)).unwrap();
        let (train2, _) = split(&data, 0.5, SplitSeed::Fixed(2)).unwrap();

        // 200 Bernoulli draws agreeing across two seeds would be absurd.
        assert_ne!(train1, train2);
    }

    #[test]
    fn test_invalid_fractions_rejected() {
        let data = dataset(10);
        for fraction in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let err = split(&data, fraction, SplitSeed::default()).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidFraction(_)));
        }
    }
}
