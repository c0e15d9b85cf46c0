//! Scour: a cleaning pipeline for tabular patient-record datasets.
//!
//! Scour loads a raw CSV into a typed table, then runs a fixed sequence of
//! transformations: missing values are canonicalized and imputed (column
//! mean for numeric columns, column mode for categorical ones), rows outside
//! the per-column IQR fences are removed, the selected feature columns are
//! standardized to zero mean and unit variance, and identifier columns are
//! pruned. The cleaned table is exported as CSV alongside a JSON cleaning
//! report and two descriptive charts.
//!
//! # Design
//!
//! - **Deterministic**: quantiles use linear interpolation and mode ties
//!   resolve lexicographically, so identical input always yields identical
//!   output.
//! - **Fail fast**: a misconfigured column name or a degenerate column
//!   (entirely missing, or zero variance at scaling) aborts the run with an
//!   error naming the column and stage; no partial artifact is written.
//! - **Single owner**: the table is threaded mutably through the stages,
//!   one stage at a time, with no hidden aliasing.
//!
//! # Example
//!
//! ```no_run
//! use scour::{Pipeline, PipelineConfig, Reader, ReaderConfig};
//!
//! let config = PipelineConfig::default();
//! let reader = Reader::with_config(
//!     ReaderConfig::default().with_sentinel(config.sentinel.as_str()),
//! );
//!
//! let (mut table, source) = reader.read_file("patients.csv").unwrap();
//! let report = Pipeline::new(config).run(&mut table, Some(source)).unwrap();
//!
//! println!("{} -> {} rows", report.initial_rows, report.final_rows);
//! scour::output::write_csv(&table, "patients_cleaned.csv").unwrap();
//! ```

pub mod error;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod stats;
pub mod table;

pub use error::{Result, ScourError, Stage};
pub use input::{Reader, ReaderConfig, SourceMetadata};
pub use output::{ChartKind, ChartRenderer, ChartSpec, TextRenderer};
pub use pipeline::{CleaningReport, Pipeline, PipelineConfig, StageSummary};
pub use table::{Column, NumericSummary, Table, Values};
