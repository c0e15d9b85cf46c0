//! Clean command - run the pipeline, export the cleaned data, print charts.

use std::path::PathBuf;

use colored::Colorize;
use scour::output::{self, ChartRenderer, ChartSpec, TextRenderer};
use scour::{Pipeline, PipelineConfig, Reader, ReaderConfig};

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    sentinel: String,
    fence: f64,
    id_columns: Vec<String>,
    target: String,
    excluded: Vec<String>,
    scatter_x: String,
    no_charts: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Data file not found: {}", file.display()).into());
    }

    let defaults = PipelineConfig::default();
    let config = PipelineConfig {
        sentinel,
        fence_multiplier: fence,
        identifier_columns: if id_columns.is_empty() {
            defaults.identifier_columns
        } else {
            id_columns
        },
        target_column: target.clone(),
        excluded_columns: if excluded.is_empty() {
            defaults.excluded_columns
        } else {
            excluded
        },
    };

    let reader = Reader::with_config(
        ReaderConfig::default().with_sentinel(config.sentinel.as_str()),
    );
    let (mut table, source) = reader.read_file(&file)?;

    println!(
        "{} {} ({} rows x {} columns, {})",
        "Loaded".cyan().bold(),
        file.display(),
        source.row_count,
        source.column_count,
        source.format
    );

    if verbose {
        println!("{}", "Missing values per column:".white().bold());
        for (name, count) in table.missing_counts() {
            println!("  {:<24} {}", name, count);
        }
    }

    let pipeline = Pipeline::new(config);
    let run_report = pipeline.run(&mut table, Some(source))?;

    for stage in &run_report.stages {
        println!(
            "  {:<7} {} -> {} rows ({} values changed)",
            stage.stage.to_string().cyan(),
            stage.rows_before,
            stage.rows_after,
            stage.values_changed
        );
    }

    let output_path = output.unwrap_or_else(|| {
        let stem = file.file_stem().unwrap_or_default().to_string_lossy();
        file.with_file_name(format!("{}_cleaned.csv", stem))
    });
    output::write_csv(&table, &output_path)?;
    println!(
        "{} cleaned data to {}",
        "Wrote".green().bold(),
        output_path.display().to_string().cyan()
    );

    let report_path = report.unwrap_or_else(|| scour::pipeline::report_path(&file));
    run_report.save(&report_path)?;
    println!(
        "{} report to {}",
        "Wrote".green().bold(),
        report_path.display().to_string().cyan()
    );

    if !no_charts {
        let renderer = TextRenderer::default();
        let specs = [
            ChartSpec::count_distribution(
                target.as_str(),
                format!("Distribution of {} cases", target),
            ),
            ChartSpec::scatter(
                scatter_x.as_str(),
                target.as_str(),
                format!("{} vs {}", target, scatter_x),
            ),
        ];

        for spec in &specs {
            println!();
            match renderer.render(&table, spec) {
                Ok(chart) => println!("{}", chart),
                // Rendering is presentation only; a chart failure never
                // fails the run.
                Err(e) => println!(
                    "{} could not render '{}': {}",
                    "Warning:".yellow().bold(),
                    spec.title,
                    e
                ),
            }
        }
    }

    Ok(())
}
