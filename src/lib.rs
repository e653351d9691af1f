//! Diabetes risk regression pipeline.
//!
//! Loads patient records from a row source, partitions them with a seeded
//! Bernoulli split, fits a random-forest regressor on the training subset,
//! scores it on the held-out subset, and serves single-record predictions
//! through the fitted model.

pub mod cart;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod forest;
pub mod metrics;
pub mod predictor;
pub mod source;
pub mod split;
pub mod trainer;

use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};

pub use config::{AppSettings, DB_CONNECTION};
pub use dataset::{to_features, to_label, Dataset, FeatureVector, PatientRecord, FEATURE_COLUMNS};
pub use errors::PipelineError;
pub use forest::{ForestConfig, ForestRegressor};
pub use metrics::{evaluate, EvaluationMetrics};
pub use predictor::Predictor;
pub use source::{load, CsvRowSource, RowSource, PATIENT_QUERY};
pub use split::{split, SplitSeed, DEFAULT_SEED};
pub use trainer::{ForestTrainer, Regressor, Trainer};

/// Options for one pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub test_fraction: f64,
    pub seed: SplitSeed,
    pub forest: ForestConfig,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: SplitSeed::default(),
            forest: ForestConfig::default(),
        }
    }
}

impl PipelineOptions {
    pub fn new(test_fraction: f64) -> Self {
        Self {
            test_fraction,
            ..Self::default()
        }
    }
}

/// Outcome of one pipeline run: subset counts, held-out metrics, and a
/// predictor over the fitted model.
#[derive(Debug)]
pub struct PipelineReport {
    pub record_count: usize,
    pub train_count: usize,
    pub test_count: usize,
    pub metrics: Option<EvaluationMetrics>,
    pub predictor: Predictor,
}

/// Run the full pipeline: load, split, fit, evaluate.
///
/// Stages run strictly forward; a load or split failure aborts before any
/// training. An empty held-out subset skips evaluation but does not discard
/// the fitted model, so the returned predictor serves either way.
pub fn run_pipeline(
    source: &dyn RowSource,
    options: &PipelineOptions,
) -> Result<PipelineReport, PipelineError> {
    info!("Loading data from row source...");
    let dataset = source::load(source)?;
    info!("Loaded {} patient records", dataset.len());

    let (train_set, test_set) = split::split(&dataset, options.test_fraction, options.seed)?;
    info!("Training set: {} patients", train_set.len());
    info!("Test set: {} patients", test_set.len());

    let trainer = ForestTrainer::new(options.forest.clone());

    info!("Training started at {}", Local::now().format("%H:%M:%S"));
    let model = trainer.fit(&train_set.feature_matrix(), &train_set.labels())?;
    info!("Training finished at {}", Local::now().format("%H:%M:%S"));

    let model: Arc<dyn Regressor> = Arc::from(model);

    let metrics = match metrics::evaluate(
        model.as_ref(),
        &test_set.feature_matrix(),
        &test_set.labels(),
    ) {
        Ok(metrics) => Some(metrics),
        Err(PipelineError::EmptyTestSet) => {
            warn!("Test set is empty; skipping evaluation");
            None
        }
        Err(err) => return Err(err),
    };

    Ok(PipelineReport {
        record_count: dataset.len(),
        train_count: train_set.len(),
        test_count: test_set.len(),
        metrics,
        predictor: Predictor::fitted(model),
    })
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
