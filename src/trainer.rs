//! Trainer and regressor capability traits.
//!
//! Any model family able to fit fixed-length numeric vectors against a
//! scalar target satisfies [`Trainer`]; the random forest in
//! [`crate::forest`] is the reference implementation. Swapping the
//! regressor touches nothing in the splitter, evaluator, or predictor.

use crate::dataset::FeatureVector;
use crate::errors::{PipelineError, Result};
use crate::forest::{ForestConfig, ForestRegressor};

/// A fitted regression model. `predict` is read-only and deterministic;
/// implementations must be safe to call from multiple threads at once.
pub trait Regressor: std::fmt::Debug + Send + Sync {
    fn predict(&self, features: &FeatureVector) -> f64;
}

/// One-shot model fitting over paired features and labels. Fitting does not
/// mutate its inputs and has no effect outside the returned model.
pub trait Trainer {
    fn fit(&self, features: &[FeatureVector], labels: &[f64]) -> Result<Box<dyn Regressor>>;
}

/// Random-forest trainer, the reference [`Trainer`] implementation.
#[derive(Clone, Debug, Default)]
pub struct ForestTrainer {
    config: ForestConfig,
}

impl ForestTrainer {
    pub fn new(config: ForestConfig) -> Self {
        Self { config }
    }
}

impl Trainer for ForestTrainer {
    fn fit(&self, features: &[FeatureVector], labels: &[f64]) -> Result<Box<dyn Regressor>> {
        if features.is_empty() || features.len() != labels.len() {
            return Err(PipelineError::EmptyTrainingSet);
        }
        if self.config.trees == 0 {
            return Err(PipelineError::InvalidConfiguration(
                "forest needs at least one tree".to_string(),
            ));
        }

        Ok(Box::new(ForestRegressor::fit(
            features,
            labels,
            &self.config,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FEATURE_COUNT;

    #[test]
    fn test_fit_rejects_empty_training_set() {
        let trainer = ForestTrainer::default();
        let err = trainer.fit(&[], &[]).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyTrainingSet));
    }

    #[test]
    fn test_fit_rejects_length_mismatch() {
        let trainer = ForestTrainer::default();
        let features = vec![[1.0; FEATURE_COUNT]];
        let err = trainer.fit(&features, &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyTrainingSet));
        // The message must cover the mismatch case, not just zero records.
        assert!(err.to_string().contains("equal-length"));
    }

    #[test]
    fn test_fit_rejects_zero_trees() {
        let trainer = ForestTrainer::new(ForestConfig {
            trees: 0,
            ..ForestConfig::default()
        });

        let features = vec![[1.0; FEATURE_COUNT], [2.0; FEATURE_COUNT]];
        let err = trainer.fit(&features, &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_fit_returns_usable_model() {
        let trainer = ForestTrainer::new(ForestConfig {
            trees: 16,
            max_depth: 4,
            min_samples_leaf: 1,
            seed: 42,
        });

        let features: Vec<_> = (0..8).map(|i| [i as f64; FEATURE_COUNT]).collect();
        let labels: Vec<f64> = (0..8).map(|i| i as f64 * 10.0).collect();

        let model = trainer.fit(&features, &labels).unwrap();
        let prediction = model.predict(&[3.0; FEATURE_COUNT]);
        assert!(prediction.is_finite());
        assert!((0.0..=70.0).contains(&prediction));
    }
}
