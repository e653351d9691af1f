//! Random-forest regression.
//!
//! Bagged variance-split trees; the fitted forest predicts the mean of its
//! trees. Tree construction runs in parallel but stays deterministic: each
//! tree's RNG is derived from the forest seed and the tree index, so the
//! result is independent of thread scheduling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::cart::{CartBuilder, Tree, TreeConfig};
use crate::dataset::FeatureVector;
use crate::split::DEFAULT_SEED;
use crate::trainer::Regressor;

/// Forest training configuration.
#[derive(Clone, Debug)]
pub struct ForestConfig {
    pub trees: usize,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            max_depth: 8,
            min_samples_leaf: 2,
            seed: DEFAULT_SEED,
        }
    }
}

/// A fitted random forest. Immutable after creation; `predict` touches no
/// internal mutable state, so concurrent calls are safe.
#[derive(Clone, Debug)]
pub struct ForestRegressor {
    trees: Vec<Tree>,
}

impl ForestRegressor {
    /// Fit a forest over non-empty, equal-length features and labels.
    /// Callers validate emptiness; see `ForestTrainer`.
    pub fn fit(features: &[FeatureVector], labels: &[f64], config: &ForestConfig) -> Self {
        let n = features.len();
        let tree_config = TreeConfig {
            max_depth: config.max_depth,
            min_samples_leaf: config.min_samples_leaf,
        };

        let trees: Vec<Tree> = (0..config.trees)
            .into_par_iter()
            .map(|tree_index| {
                let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(tree_index as u64));
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

                CartBuilder::new(features, labels, tree_config.clone()).build(&sample)
            })
            .collect();

        Self { trees }
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for ForestRegressor {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        sum / self.trees.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FEATURE_COUNT;

    fn linear_data(n: usize) -> (Vec<FeatureVector>, Vec<f64>) {
        let features = (0..n).map(|i| [i as f64; FEATURE_COUNT]).collect();
        let labels = (0..n).map(|i| i as f64).collect();
        (features, labels)
    }

    fn small_config() -> ForestConfig {
        ForestConfig {
            trees: 64,
            max_depth: 8,
            min_samples_leaf: 1,
            seed: 42,
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (features, labels) = linear_data(20);

        let forest1 = ForestRegressor::fit(&features, &labels, &small_config());
        let forest2 = ForestRegressor::fit(&features, &labels, &small_config());

        assert_eq!(forest1.tree_count(), forest2.tree_count());
        for (f1, f2) in features.iter().zip(features.iter()) {
            assert_eq!(forest1.predict(f1), forest2.predict(f2));
        }
    }

    #[test]
    fn test_forest_learns_linear_signal() {
        let (features, labels) = linear_data(10);
        let forest = ForestRegressor::fit(&features, &labels, &small_config());

        // Stay within the model family's in-sample error, not exact.
        for (f, &label) in features.iter().zip(labels.iter()) {
            let predicted = forest.predict(f);
            assert!(
                (predicted - label).abs() < 2.0,
                "predicted {} for label {}",
                predicted,
                label
            );
        }
    }

    #[test]
    fn test_forest_beats_mean_baseline() {
        let (features, labels) = linear_data(30);
        let forest = ForestRegressor::fit(&features, &labels, &small_config());

        let mean: f64 = labels.iter().sum::<f64>() / labels.len() as f64;
        let baseline_sse: f64 = labels.iter().map(|&y| (y - mean) * (y - mean)).sum();
        let forest_sse: f64 = features
            .iter()
            .zip(labels.iter())
            .map(|(f, &y)| {
                let p = forest.predict(f);
                (p - y) * (p - y)
            })
            .sum();

        assert!(
            forest_sse < baseline_sse,
            "forest SSE {} not better than baseline SSE {}",
            forest_sse,
            baseline_sse
        );
    }

    #[test]
    fn test_seed_changes_the_forest() {
        let (features, labels) = linear_data(30);

        let mut other = small_config();
        other.seed = 1;

        let forest1 = ForestRegressor::fit(&features, &labels, &small_config());
        let forest2 = ForestRegressor::fit(&features, &labels, &other);

        let differs = features
            .iter()
            .any(|f| forest1.predict(f) != forest2.predict(f));
        assert!(differs, "different seeds should draw different bootstraps");
    }
}
