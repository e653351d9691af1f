//! Patient records, datasets, and feature assembly.
//!
//! The eight-field feature order defined here is the model's input
//! contract: training and inference both assemble vectors through
//! [`to_features`], so the field-to-position mapping cannot drift.

use serde::{Deserialize, Serialize};

/// Canonical feature field order. Position in this array is position in the
/// assembled [`FeatureVector`].
pub const FEATURE_COLUMNS: [&str; 8] = [
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "SkinThickness",
    "Insulin",
    "BMI",
    "DiabetesPedigreeFunction",
    "Age",
];

/// Number of model input features.
pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

/// Fixed-length numeric input to a model, ordered per [`FEATURE_COLUMNS`].
pub type FeatureVector = [f64; FEATURE_COUNT];

/// One row of patient data. `id` is informational only and never a feature;
/// `diabetes_value` is the regression target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PatientRecord {
    #[serde(default)]
    pub id: u32,
    pub pregnancies: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "DiabetesPedigreeFunction")]
    pub diabetes_pedigree: f64,
    pub age: f64,
    #[serde(default)]
    pub diabetes_value: f64,
}

/// Assemble the fixed-order feature vector for a record.
pub fn to_features(record: &PatientRecord) -> FeatureVector {
    [
        record.pregnancies,
        record.glucose,
        record.blood_pressure,
        record.skin_thickness,
        record.insulin,
        record.bmi,
        record.diabetes_pedigree,
        record.age,
    ]
}

/// The regression label for a record.
pub fn to_label(record: &PatientRecord) -> f64 {
    record.diabetes_value
}

/// An immutable ordered collection of patient records. Created once per
/// pipeline run and never mutated afterwards; splitting produces new
/// datasets rather than reordering this one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    records: Vec<PatientRecord>,
}

impl Dataset {
    pub fn new(records: Vec<PatientRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    /// Feature vectors for all records, in dataset order.
    pub fn feature_matrix(&self) -> Vec<FeatureVector> {
        self.records.iter().map(to_features).collect()
    }

    /// Labels for all records, in dataset order.
    pub fn labels(&self) -> Vec<f64> {
        self.records.iter().map(to_label).collect()
    }
}
