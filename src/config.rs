//! Process settings with the named database connection string.
//!
//! Resolved once at startup, before any row-source access; a missing or
//! malformed settings file is reported first.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::errors::{PipelineError, Result};

/// Name of the connection string the pipeline reads.
pub const DB_CONNECTION: &str = "DbConnection";

/// Application settings file.
/// Expected shape: `{"ConnectionStrings": {"DbConnection": "..."}}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(rename = "ConnectionStrings", default)]
    pub connection_strings: HashMap<String, String>,
}

impl AppSettings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            PipelineError::Settings(format!("{}: {}", path.display(), err))
        })?;

        serde_json::from_str(&content)
            .map_err(|err| PipelineError::Settings(format!("{}: {}", path.display(), err)))
    }

    /// Look up a named connection string.
    pub fn connection_string(&self, name: &str) -> Result<&str> {
        self.connection_strings
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| {
                PipelineError::Settings(format!("connection string {:?} not found", name))
            })
    }
}
