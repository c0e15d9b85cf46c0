//! Typed column storage and per-column numeric summaries.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::stats;

/// The values of a column. `None` is the missing marker, distinct from any
/// valid data value.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name from the header row.
    pub name: String,
    /// Typed values, positionally aligned with the other columns.
    pub values: Values,
}

impl Column {
    /// Create a numeric column.
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values: Values::Numeric(values),
        }
    }

    /// Create a categorical column.
    pub fn categorical(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            values: Values::Categorical(values),
        }
    }

    /// Number of values (including missing ones).
    pub fn len(&self) -> usize {
        match &self.values {
            Values::Numeric(v) => v.len(),
            Values::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.values, Values::Numeric(_))
    }

    /// "numeric" or "categorical", for display.
    pub fn kind(&self) -> &'static str {
        match &self.values {
            Values::Numeric(_) => "numeric",
            Values::Categorical(_) => "categorical",
        }
    }

    /// Number of missing values.
    pub fn missing_count(&self) -> usize {
        match &self.values {
            Values::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            Values::Categorical(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Number of distinct non-missing values.
    pub fn unique_count(&self) -> usize {
        match &self.values {
            Values::Numeric(v) => v
                .iter()
                .flatten()
                .map(|x| x.to_bits())
                .collect::<BTreeSet<_>>()
                .len(),
            Values::Categorical(v) => v
                .iter()
                .flatten()
                .map(|s| s.as_str())
                .collect::<BTreeSet<_>>()
                .len(),
        }
    }

    /// Non-missing numeric values, or `None` for a categorical column.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        match &self.values {
            Values::Numeric(v) => Some(v.iter().flatten().copied().collect()),
            Values::Categorical(_) => None,
        }
    }

    /// Numeric summary of a numeric column with at least one value.
    pub fn summary(&self) -> Option<NumericSummary> {
        let values = self.numeric_values()?;
        NumericSummary::from_values(&values)
    }

    /// Cell rendered as text; missing values render as the empty string.
    pub fn cell_text(&self, row: usize) -> String {
        match &self.values {
            Values::Numeric(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|x| x.to_string())
                .unwrap_or_default(),
            Values::Categorical(v) => v
                .get(row)
                .and_then(|x| x.clone())
                .unwrap_or_default(),
        }
    }
}

/// Descriptive statistics for a numeric column, computed fresh per run and
/// never persisted across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation (ddof = 0).
    pub std: f64,
    pub median: f64,
    /// First quartile (25th percentile), linear interpolation.
    pub q1: f64,
    /// Third quartile (75th percentile), linear interpolation.
    pub q3: f64,
}

impl NumericSummary {
    /// Compute a summary from raw values. `None` if there are no values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = stats::mean(&sorted)?;
        Some(Self {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean,
            std: stats::population_std(&sorted, mean),
            median: stats::quantile(&sorted, 0.5),
            q1: stats::quantile(&sorted, 0.25),
            q3: stats::quantile(&sorted, 0.75),
        })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lower and upper outlier fences for a given IQR multiplier.
    pub fn fences(&self, multiplier: f64) -> (f64, f64) {
        let iqr = self.iqr();
        (self.q1 - multiplier * iqr, self.q3 + multiplier * iqr)
    }
}
