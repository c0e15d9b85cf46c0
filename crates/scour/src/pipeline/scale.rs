//! Feature standardization to zero mean and unit variance.
//!
//! The population standard deviation (ddof = 0) is used, matching the
//! behavior of scikit-learn's StandardScaler.

use crate::error::{Result, ScourError, Stage};
use crate::pipeline::PipelineConfig;
use crate::stats;
use crate::table::{Table, Values};

/// Fitted scaling parameters for one column.
#[derive(Debug, Clone, Copy)]
struct StandardScaler {
    mean: f64,
    std: f64,
}

impl StandardScaler {
    fn transform(&self, value: f64) -> f64 {
        (value - self.mean) / self.std
    }
}

/// Names of the columns selected for standardization: every numeric column
/// minus identifiers, the target, and the categorical-coded columns.
pub fn selection(table: &Table, config: &PipelineConfig) -> Vec<String> {
    table
        .numeric_column_names()
        .into_iter()
        .filter(|name| {
            !config.identifier_columns.iter().any(|c| c == name)
                && config.target_column != *name
                && !config.excluded_columns.iter().any(|c| c == name)
        })
        .collect()
}

/// Standardize every selected column in place. Returns the number of values
/// rewritten. Columns outside the selection are untouched and the column set
/// never changes.
///
/// A selected column with zero variance fails with
/// [`ScourError::DegenerateColumn`] instead of producing NaN/Inf.
pub fn standardize(table: &mut Table, config: &PipelineConfig) -> Result<usize> {
    let mut changed = 0;

    for name in selection(table, config) {
        let col = table
            .column_mut(&name)
            .ok_or_else(|| ScourError::Schema {
                column: name.clone(),
                stage: Stage::Scale,
            })?;

        let Values::Numeric(values) = &mut col.values else {
            continue;
        };

        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let mean = stats::mean(&present).ok_or_else(|| ScourError::DegenerateColumn {
            column: name.clone(),
            stage: Stage::Scale,
            reason: "no values to fit".to_string(),
        })?;
        let std = stats::population_std(&present, mean);

        if std == 0.0 {
            return Err(ScourError::DegenerateColumn {
                column: name.clone(),
                stage: Stage::Scale,
                reason: "zero variance".to_string(),
            });
        }

        let scaler = StandardScaler { mean, std };
        for cell in values.iter_mut() {
            if let Some(v) = cell {
                *v = scaler.transform(*v);
                changed += 1;
            }
        }
    }

    Ok(changed)
}
