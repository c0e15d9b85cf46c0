//! Error types for the Scour library.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pipeline stage in which an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Missing-value canonicalization and imputation.
    Impute,
    /// IQR outlier filtering.
    Filter,
    /// Feature standardization.
    Scale,
    /// Identifier column removal.
    Prune,
    /// Export and chart rendering.
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Impute => "impute",
            Stage::Filter => "filter",
            Stage::Scale => "scale",
            Stage::Prune => "prune",
            Stage::Report => "report",
        };
        write!(f, "{}", name)
    }
}

/// Main error type for Scour operations.
#[derive(Debug, Error)]
pub enum ScourError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Columns with mismatched row counts.
    #[error("Shape error: {0}")]
    Shape(String),

    /// A configured column is absent from the table.
    #[error("column '{column}' not found during {stage}")]
    Schema { column: String, stage: Stage },

    /// A column too degenerate to process: entirely missing at imputation
    /// or zero variance at scaling.
    #[error("degenerate column '{column}' during {stage}: {reason}")]
    DegenerateColumn {
        column: String,
        stage: Stage,
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Scour operations.
pub type Result<T> = std::result::Result<T, ScourError>;
