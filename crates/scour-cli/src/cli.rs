//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scour: cleaning pipeline for tabular patient datasets
#[derive(Parser)]
#[command(name = "scour")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full cleaning pipeline and export the cleaned dataset
    Clean {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the cleaned data (default: <file>_cleaned.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for the cleaning report (default: <file>.cleaning.json)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Raw token treated as a missing value
        #[arg(long, default_value = "?")]
        sentinel: String,

        /// IQR fence multiplier for outlier removal
        #[arg(long, default_value_t = 1.5)]
        fence: f64,

        /// Identifier column(s) to drop after processing (default: index)
        #[arg(long = "id-column", value_name = "NAME")]
        id_columns: Vec<String>,

        /// Target/label column, excluded from scaling
        #[arg(long, default_value = "ICU")]
        target: String,

        /// Categorical-coded numeric column(s) excluded from scaling
        /// (default: SEX, CLASIFFICATION_FINAL)
        #[arg(long = "exclude", value_name = "NAME")]
        excluded: Vec<String>,

        /// Numeric feature to scatter against the target
        #[arg(long, default_value = "AGE")]
        scatter_x: String,

        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
    },

    /// Profile a dataset without modifying it
    Inspect {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
