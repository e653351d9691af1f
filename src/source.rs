//! Row source collaborator and dataset loading.
//!
//! The concrete storage engine lives behind [`RowSource`]; the pipeline only
//! sees ten-column rows in source order. [`CsvRowSource`] is the in-repo
//! implementation, reading the same columns from a file named by the
//! connection string.

use std::path::PathBuf;

use crate::dataset::{Dataset, PatientRecord};
use crate::errors::{PipelineError, Result};

/// Fixed query over the patient table. Constant by design: the row source
/// never receives user-supplied query text.
pub const PATIENT_QUERY: &str = "SELECT CAST(Id AS REAL) AS Id, Pregnancies, Glucose, \
     BloodPressure, SkinThickness, Insulin, BMI, DiabetesPedigreeFunction, Age, \
     DiabetesValue FROM Patient";

/// Column order of [`PATIENT_QUERY`] results.
pub const COLUMNS: [&str; 10] = [
    "Id",
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "SkinThickness",
    "Insulin",
    "BMI",
    "DiabetesPedigreeFunction",
    "Age",
    "DiabetesValue",
];

/// One raw row as returned by the collaborator, cells in query column order.
pub type RawRow = Vec<String>;

/// External row-source collaborator. A database client implements this by
/// running [`PATIENT_QUERY`]; any implementation must return rows in the
/// order the underlying source yields them.
pub trait RowSource {
    /// Fetch all rows. Fails with `SourceUnavailable` when the source
    /// cannot be opened.
    fn fetch_rows(&self) -> Result<Vec<RawRow>>;
}

/// Load the full dataset from a row source.
///
/// Rows are coerced to [`PatientRecord`] in source order, with no resort.
/// The returned dataset is an independent in-memory copy; a later failure
/// in the source does not affect it.
pub fn load(source: &dyn RowSource) -> Result<Dataset> {
    let rows = source.fetch_rows()?;

    let mut records = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.iter().enumerate() {
        records.push(coerce(row_idx, row)?);
    }

    Ok(Dataset::new(records))
}

/// Coerce one raw row to a patient record. Missing or non-numeric cells are
/// a data-quality error, never a silent default.
fn coerce(row_idx: usize, row: &[String]) -> Result<PatientRecord> {
    if row.len() != COLUMNS.len() {
        return Err(PipelineError::SchemaMismatch(format!(
            "row {}: expected {} columns, got {}",
            row_idx + 1,
            COLUMNS.len(),
            row.len()
        )));
    }

    let mut values = [0.0f64; 10];
    for (col_idx, cell) in row.iter().enumerate() {
        let parsed = cell.trim().parse::<f64>().map_err(|_| {
            PipelineError::SchemaMismatch(format!(
                "row {}, column {}: {:?} is not numeric",
                row_idx + 1,
                COLUMNS[col_idx],
                cell
            ))
        })?;

        if !parsed.is_finite() {
            return Err(PipelineError::SchemaMismatch(format!(
                "row {}, column {}: value {} is not finite",
                row_idx + 1,
                COLUMNS[col_idx],
                parsed
            )));
        }

        values[col_idx] = parsed;
    }

    Ok(PatientRecord {
        id: values[0] as u32,
        pregnancies: values[1],
        glucose: values[2],
        blood_pressure: values[3],
        skin_thickness: values[4],
        insulin: values[5],
        bmi: values[6],
        diabetes_pedigree: values[7],
        age: values[8],
        diabetes_value: values[9],
    })
}

/// File-backed row source over the ten-column patient schema.
/// Expected format: one comma-separated row per line, optional header line,
/// `#` comment lines ignored.
#[derive(Clone, Debug)]
pub struct CsvRowSource {
    path: PathBuf,
}

impl CsvRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RowSource for CsvRowSource {
    fn fetch_rows(&self) -> Result<Vec<RawRow>> {
        let content = std::fs::read_to_string(&self.path).map_err(|err| {
            PipelineError::SourceUnavailable(format!("{}: {}", self.path.display(), err))
        })?;

        let mut rows = Vec::new();
        let mut first_line = true;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let cells: Vec<String> = line.split(',').map(|s| s.trim().to_string()).collect();

            // Header line carrying the Id column name is skipped.
            let is_header = first_line
                && cells
                    .first()
                    .map(|c| c.eq_ignore_ascii_case("id"))
                    .unwrap_or(false);
            first_line = false;
            if is_header {
                continue;
            }

            rows.push(cells);
        }

        Ok(rows)
    }
}
