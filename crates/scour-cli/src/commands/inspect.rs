//! Inspect command - profile a dataset without modifying it.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use scour::{NumericSummary, Reader, SourceMetadata};

/// Per-column slice of the profile.
#[derive(Debug, Serialize)]
struct ColumnProfile {
    name: String,
    kind: &'static str,
    missing: usize,
    unique: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<NumericSummary>,
}

/// Full dataset profile, printable as text or JSON.
#[derive(Debug, Serialize)]
struct Profile {
    source: SourceMetadata,
    rows: usize,
    columns: Vec<ColumnProfile>,
}

pub fn run(file: PathBuf, json: bool, _verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Data file not found: {}", file.display()).into());
    }

    let reader = Reader::new();
    let (table, source) = reader.read_file(&file)?;

    let columns: Vec<ColumnProfile> = table
        .columns()
        .iter()
        .map(|col| ColumnProfile {
            name: col.name.clone(),
            kind: col.kind(),
            missing: col.missing_count(),
            unique: col.unique_count(),
            summary: col.summary(),
        })
        .collect();

    let profile = Profile {
        source,
        rows: table.row_count(),
        columns,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows x {} columns, {})",
        "Dataset".cyan().bold(),
        profile.source.file,
        profile.rows,
        profile.columns.len(),
        profile.source.format
    );
    println!();
    println!(
        "{:<24} {:<12} {:>8} {:>8}",
        "Column".white().bold(),
        "Type".white().bold(),
        "Missing".white().bold(),
        "Unique".white().bold()
    );
    for col in &profile.columns {
        println!(
            "{:<24} {:<12} {:>8} {:>8}",
            col.name, col.kind, col.missing, col.unique
        );
    }

    let numeric: Vec<_> = profile
        .columns
        .iter()
        .filter_map(|c| c.summary.as_ref().map(|s| (&c.name, s)))
        .collect();
    if !numeric.is_empty() {
        println!();
        println!(
            "{:<24} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "Numeric column".white().bold(),
            "min",
            "q1",
            "median",
            "q3",
            "max"
        );
        for (name, s) in numeric {
            println!(
                "{:<24} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
                name, s.min, s.q1, s.median, s.q3, s.max
            );
        }
    }

    Ok(())
}
