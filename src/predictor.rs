//! Single-record inference over a fitted model.

use std::sync::Arc;

use crate::dataset::{to_features, PatientRecord};
use crate::errors::{PipelineError, Result};
use crate::trainer::Regressor;

/// Serves point predictions once a model is attached. Feature assembly goes
/// through the same [`to_features`] used at training time, so the
/// field-to-position mapping is identical on both paths.
#[derive(Clone, Debug, Default)]
pub struct Predictor {
    model: Option<Arc<dyn Regressor>>,
}

impl Predictor {
    /// A predictor with no model yet; every `predict` fails with
    /// `ModelNotFitted` until one is attached.
    pub fn unfitted() -> Self {
        Self { model: None }
    }

    pub fn fitted(model: Arc<dyn Regressor>) -> Self {
        Self { model: Some(model) }
    }

    pub fn attach(&mut self, model: Arc<dyn Regressor>) {
        self.model = Some(model);
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Predict the diabetes value for one record. Single-shot: a failure is
    /// terminal for this request, with no retry.
    pub fn predict(&self, record: &PatientRecord) -> Result<f64> {
        let model = self.model.as_deref().ok_or(PipelineError::ModelNotFitted)?;
        Ok(model.predict(&to_features(record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FeatureVector;

    #[derive(Debug)]
    struct FirstFeatureModel;

    impl Regressor for FirstFeatureModel {
        fn predict(&self, features: &FeatureVector) -> f64 {
            features[0]
        }
    }

    fn record(pregnancies: f64) -> PatientRecord {
        PatientRecord {
            id: 0,
            pregnancies,
            glucose: 0.0,
            blood_pressure: 0.0,
            skin_thickness: 0.0,
            insulin: 0.0,
            bmi: 0.0,
            diabetes_pedigree: 0.0,
            age: 0.0,
            diabetes_value: 0.0,
        }
    }

    #[test]
    fn test_unfitted_predictor_fails() {
        let predictor = Predictor::unfitted();
        let err = predictor.predict(&record(1.0)).unwrap_err();
        assert!(matches!(err, PipelineError::ModelNotFitted));
    }

    #[test]
    fn test_fitted_predictor_uses_training_time_assembly() {
        let predictor = Predictor::fitted(Arc::new(FirstFeatureModel));
        // Pregnancies is position 0 of the feature vector.
        assert_eq!(predictor.predict(&record(3.0)).unwrap(), 3.0);
    }

    #[test]
    fn test_attach_enables_prediction() {
        let mut predictor = Predictor::unfitted();
        assert!(!predictor.is_fitted());

        predictor.attach(Arc::new(FirstFeatureModel));
        assert!(predictor.is_fitted());
        assert!(predictor.predict(&record(2.0)).is_ok());
    }
}
