//! Regression metrics over a held-out test set.

use crate::dataset::FeatureVector;
use crate::errors::{PipelineError, Result};
use crate::trainer::Regressor;

/// Aggregate regression metrics, derived purely from (prediction, label)
/// pairs. `r_squared` is `NaN` when the test labels have zero variance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvaluationMetrics {
    pub r_squared: f64,
    pub rmse: f64,
}

/// Score a fitted model on the test set.
///
/// Deterministic given a fixed model and test set. Fails with
/// `EmptyTestSet` when there are no records to score.
pub fn evaluate(
    model: &dyn Regressor,
    features: &[FeatureVector],
    labels: &[f64],
) -> Result<EvaluationMetrics> {
    if features.is_empty() || features.len() != labels.len() {
        return Err(PipelineError::EmptyTestSet);
    }

    let predictions: Vec<f64> = features.iter().map(|f| model.predict(f)).collect();
    Ok(from_pairs(&predictions, labels))
}

/// Compute metrics from already-paired predictions and labels.
/// Caller guarantees equal, non-zero lengths.
pub fn from_pairs(predictions: &[f64], labels: &[f64]) -> EvaluationMetrics {
    let n = labels.len() as f64;

    let ss_res: f64 = predictions
        .iter()
        .zip(labels.iter())
        .map(|(&p, &y)| (y - p) * (y - p))
        .sum();

    let mean: f64 = labels.iter().sum::<f64>() / n;
    let ss_tot: f64 = labels.iter().map(|&y| (y - mean) * (y - mean)).sum();

    // Zero-variance labels leave R^2 undefined; report the sentinel
    // instead of dividing by zero.
    let r_squared = if ss_tot == 0.0 {
        f64::NAN
    } else {
        1.0 - ss_res / ss_tot
    };

    EvaluationMetrics {
        r_squared,
        rmse: (ss_res / n).sqrt(),
    }
}
