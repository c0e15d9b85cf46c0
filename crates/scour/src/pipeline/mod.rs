//! The cleaning pipeline: imputation → outlier filtering → scaling →
//! pruning, executed strictly in sequence over a single table.

pub mod impute;
pub mod outliers;
pub mod prune;
pub mod scale;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScourError, Stage};
use crate::input::SourceMetadata;
use crate::table::Table;

/// Configuration for a cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Raw token canonicalized into the missing marker.
    pub sentinel: String,
    /// IQR fence multiplier for outlier removal.
    pub fence_multiplier: f64,
    /// Identifier columns, never scaled and dropped at the end.
    pub identifier_columns: Vec<String>,
    /// Target/label column, excluded from scaling.
    pub target_column: String,
    /// Numeric columns carrying categorical codes, excluded from scaling.
    pub excluded_columns: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sentinel: "?".to_string(),
            fence_multiplier: 1.5,
            identifier_columns: vec!["index".to_string()],
            target_column: "ICU".to_string(),
            excluded_columns: vec![
                "SEX".to_string(),
                "CLASIFFICATION_FINAL".to_string(),
            ],
        }
    }
}

/// What one pipeline stage did to the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage: Stage,
    pub rows_before: usize,
    pub rows_after: usize,
    pub values_changed: usize,
}

/// Record of a completed cleaning run, persisted as pretty JSON next to the
/// cleaned artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Metadata of the loaded source file, when the run started from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// Configuration the run used.
    pub config: PipelineConfig,
    pub initial_rows: usize,
    pub initial_columns: usize,
    pub final_rows: usize,
    pub final_columns: usize,
    pub stages: Vec<StageSummary>,
    pub cleaned_at: DateTime<Utc>,
}

impl CleaningReport {
    /// Save the report to a JSON file, creating parent directories as
    /// needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ScourError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = File::create(path).map_err(|e| ScourError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;

        Ok(())
    }
}

/// Generate the default report path for a data file.
///
/// # Example
///
/// ```
/// use scour::pipeline::report_path;
///
/// let path = report_path("data/patients.csv");
/// assert_eq!(path.to_string_lossy(), "data/patients.cleaning.json");
/// ```
pub fn report_path(data_path: impl AsRef<Path>) -> PathBuf {
    let data_path = data_path.as_ref();
    let stem = data_path.file_stem().unwrap_or_default().to_string_lossy();
    let parent = data_path.parent().unwrap_or(Path::new("."));

    parent.join(format!("{}.cleaning.json", stem))
}

/// The cleaning pipeline driver.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Check that every configured column exists in the table before any
    /// mutation happens, so a schema mismatch never leaves the table half
    /// transformed.
    pub fn validate(&self, table: &Table) -> Result<()> {
        for name in &self.config.identifier_columns {
            if !table.has_column(name) {
                return Err(ScourError::Schema {
                    column: name.clone(),
                    stage: Stage::Prune,
                });
            }
        }

        if !table.has_column(&self.config.target_column) {
            return Err(ScourError::Schema {
                column: self.config.target_column.clone(),
                stage: Stage::Scale,
            });
        }

        for name in &self.config.excluded_columns {
            if !table.has_column(name) {
                return Err(ScourError::Schema {
                    column: name.clone(),
                    stage: Stage::Scale,
                });
            }
        }

        Ok(())
    }

    /// Run the full pipeline over the table, mutating it in place. Any stage
    /// error aborts the run immediately; nothing is written by this method,
    /// so a failed run leaves no partial artifact.
    pub fn run(
        &self,
        table: &mut Table,
        source: Option<SourceMetadata>,
    ) -> Result<CleaningReport> {
        self.validate(table)?;

        let initial_rows = table.row_count();
        let initial_columns = table.column_count();
        let mut stages = Vec::new();

        let canonicalized = impute::canonicalize_sentinel(table, &self.config.sentinel);
        let imputed = impute::impute(table)?;
        stages.push(StageSummary {
            stage: Stage::Impute,
            rows_before: initial_rows,
            rows_after: table.row_count(),
            values_changed: canonicalized + imputed,
        });

        let rows_before = table.row_count();
        let removed = outliers::filter(table, self.config.fence_multiplier);
        stages.push(StageSummary {
            stage: Stage::Filter,
            rows_before,
            rows_after: table.row_count(),
            values_changed: removed,
        });

        let rows_before = table.row_count();
        let scaled = scale::standardize(table, &self.config)?;
        stages.push(StageSummary {
            stage: Stage::Scale,
            rows_before,
            rows_after: table.row_count(),
            values_changed: scaled,
        });

        let rows_before = table.row_count();
        let pruned = prune::drop_identifiers(table, &self.config.identifier_columns)?;
        stages.push(StageSummary {
            stage: Stage::Prune,
            rows_before,
            rows_after: table.row_count(),
            values_changed: pruned,
        });

        Ok(CleaningReport {
            source,
            config: self.config.clone(),
            initial_rows,
            initial_columns,
            final_rows: table.row_count(),
            final_columns: table.column_count(),
            stages,
            cleaned_at: Utc::now(),
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
