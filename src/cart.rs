//! Regression tree construction.
//!
//! Exact-greedy CART splits chosen by sum-of-squared-error reduction, with
//! a deterministic candidate order: features ascending, thresholds
//! ascending, ties keeping the earliest candidate.

use std::cmp::Ordering;

use crate::dataset::{FeatureVector, FEATURE_COUNT};

/// Growth limits for a single tree.
#[derive(Clone, Debug)]
pub struct TreeConfig {
    pub max_depth: usize,
    pub min_samples_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            min_samples_leaf: 2,
        }
    }
}

/// One node of a fitted tree. Leaves carry `value`; interior nodes route on
/// `feature_index`/`threshold`.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub feature_index: usize,
    pub threshold: f64,
    pub left: usize,
    pub right: usize,
    pub value: Option<f64>,
}

impl Node {
    fn leaf(value: f64) -> Self {
        Self {
            feature_index: 0,
            threshold: 0.0,
            left: 0,
            right: 0,
            value: Some(value),
        }
    }
}

/// A fitted regression tree. Always has at least one node.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Route a feature vector to its leaf value.
    pub fn predict(&self, features: &FeatureVector) -> f64 {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            if let Some(value) = node.value {
                return value;
            }
            idx = if features[node.feature_index] <= node.threshold {
                node.left
            } else {
                node.right
            };
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct SplitCandidate {
    feature_index: usize,
    threshold: f64,
    gain: f64,
}

/// Builds one regression tree over a sample of the training rows.
pub struct CartBuilder<'a> {
    config: TreeConfig,
    features: &'a [FeatureVector],
    labels: &'a [f64],
}

impl<'a> CartBuilder<'a> {
    pub fn new(features: &'a [FeatureVector], labels: &'a [f64], config: TreeConfig) -> Self {
        assert_eq!(features.len(), labels.len());
        assert!(!features.is_empty());

        Self {
            config,
            features,
            labels,
        }
    }

    /// Build a tree over the given row indices (a bootstrap sample may
    /// repeat indices).
    pub fn build(&self, indices: &[usize]) -> Tree {
        assert!(!indices.is_empty());

        let mut nodes = Vec::new();
        self.build_node(indices, 0, &mut nodes);
        Tree { nodes }
    }

    fn build_node(&self, indices: &[usize], depth: usize, nodes: &mut Vec<Node>) -> usize {
        let current = nodes.len();

        if depth >= self.config.max_depth || indices.len() < 2 * self.config.min_samples_leaf {
            nodes.push(Node::leaf(self.mean_label(indices)));
            return current;
        }

        let split = match self.find_best_split(indices) {
            Some(s) => s,
            None => {
                nodes.push(Node::leaf(self.mean_label(indices)));
                return current;
            }
        };

        let (left_rows, right_rows) =
            self.partition(indices, split.feature_index, split.threshold);

        // The sweep only offers thresholds that satisfy min_samples_leaf,
        // so both sides are non-empty here.
        nodes.push(Node {
            feature_index: split.feature_index,
            threshold: split.threshold,
            left: 0,
            right: 0,
            value: None,
        });

        let left = self.build_node(&left_rows, depth + 1, nodes);
        let right = self.build_node(&right_rows, depth + 1, nodes);

        nodes[current].left = left;
        nodes[current].right = right;

        current
    }

    /// Scan every feature with a sorted prefix-sum sweep and return the
    /// split with the largest SSE reduction, if any candidate reduces it.
    fn find_best_split(&self, indices: &[usize]) -> Option<SplitCandidate> {
        let n = indices.len();
        let min_leaf = self.config.min_samples_leaf;
        let parent_sse = self.sse(indices);

        let total_sum: f64 = indices.iter().map(|&i| self.labels[i]).sum();
        let total_sumsq: f64 = indices.iter().map(|&i| self.labels[i] * self.labels[i]).sum();

        let mut best: Option<SplitCandidate> = None;

        for feature_index in 0..FEATURE_COUNT {
            let mut order = indices.to_vec();
            order.sort_by(|&a, &b| {
                self.features[a][feature_index]
                    .partial_cmp(&self.features[b][feature_index])
                    .unwrap_or(Ordering::Equal)
                    .then(a.cmp(&b))
            });

            let mut sum_left = 0.0;
            let mut sumsq_left = 0.0;

            for i in 0..n - 1 {
                let row = order[i];
                let label = self.labels[row];
                sum_left += label;
                sumsq_left += label * label;

                let value = self.features[row][feature_index];
                let next_value = self.features[order[i + 1]][feature_index];
                if value == next_value {
                    continue;
                }

                let n_left = i + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let sse_left = sumsq_left - sum_left * sum_left / n_left as f64;
                let sum_right = total_sum - sum_left;
                let sse_right =
                    (total_sumsq - sumsq_left) - sum_right * sum_right / n_right as f64;

                let gain = parent_sse - sse_left - sse_right;
                if gain <= 0.0 {
                    continue;
                }

                let candidate = SplitCandidate {
                    feature_index,
                    threshold: (value + next_value) / 2.0,
                    gain,
                };

                best = match best {
                    None => Some(candidate),
                    Some(current) if candidate.gain > current.gain => Some(candidate),
                    other => other,
                };
            }
        }

        best
    }

    fn partition(
        &self,
        indices: &[usize],
        feature_index: usize,
        threshold: f64,
    ) -> (Vec<usize>, Vec<usize>) {
        let mut left = Vec::new();
        let mut right = Vec::new();

        for &idx in indices {
            if self.features[idx][feature_index] <= threshold {
                left.push(idx);
            } else {
                right.push(idx);
            }
        }

        (left, right)
    }

    fn mean_label(&self, indices: &[usize]) -> f64 {
        let sum: f64 = indices.iter().map(|&i| self.labels[i]).sum();
        sum / indices.len() as f64
    }

    fn sse(&self, indices: &[usize]) -> f64 {
        let mean = self.mean_label(indices);
        indices
            .iter()
            .map(|&i| {
                let d = self.labels[i] - mean;
                d * d
            })
            .sum()
    }
}
