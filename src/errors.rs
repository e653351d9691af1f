//! Error types for the prediction pipeline

use thiserror::Error;

/// Errors surfaced by the pipeline stages. Each stage reports its own
/// failure kind to the caller; nothing is retried or swallowed internally.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The row source could not be opened.
    #[error("row source unavailable: {0}")]
    SourceUnavailable(String),

    /// A returned row could not be coerced to the patient schema.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Test fraction outside the open interval (0, 1).
    #[error("invalid test fraction {0}: must be strictly between 0 and 1")]
    InvalidFraction(f64),

    /// Training requires equal-length, non-empty features and labels.
    #[error("empty training set: fit requires equal-length, non-empty features and labels")]
    EmptyTrainingSet,

    /// Evaluation requires equal-length, non-empty features and labels.
    #[error("empty test set: evaluation requires equal-length, non-empty features and labels")]
    EmptyTestSet,

    /// A prediction was requested before a model was fitted.
    #[error("model not fitted: train a model before requesting predictions")]
    ModelNotFitted,

    /// Training configuration that cannot produce a model.
    #[error("invalid training configuration: {0}")]
    InvalidConfiguration(String),

    /// Settings file missing, unreadable, or malformed.
    #[error("settings error: {0}")]
    Settings(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
