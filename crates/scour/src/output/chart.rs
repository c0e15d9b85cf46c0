//! Descriptive chart rendering.
//!
//! Charts are presentation only: the pipeline hands the final table to a
//! [`ChartRenderer`] and never depends on rendering succeeding. The shipped
//! [`TextRenderer`] draws terminal charts; alternative sinks implement the
//! trait.

use indexmap::IndexMap;

use crate::error::{Result, ScourError, Stage};
use crate::table::Table;

/// The rendering intent of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Bar chart of value frequencies in one column.
    CountDistribution,
    /// Two-dimensional scatter of one numeric column against another.
    Scatter,
}

/// A declared chart: intent plus the column(s) to draw.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub x: String,
    pub y: Option<String>,
    pub title: String,
}

impl ChartSpec {
    /// A count-distribution chart of one column.
    pub fn count_distribution(x: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: ChartKind::CountDistribution,
            x: x.into(),
            y: None,
            title: title.into(),
        }
    }

    /// A scatter chart of `x` against `y`.
    pub fn scatter(
        x: impl Into<String>,
        y: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            kind: ChartKind::Scatter,
            x: x.into(),
            y: Some(y.into()),
            title: title.into(),
        }
    }
}

/// A sink that turns a table plus a chart declaration into something a
/// person can look at.
pub trait ChartRenderer {
    fn render(&self, table: &Table, spec: &ChartSpec) -> Result<String>;
}

/// Renders charts as terminal text.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    /// Maximum bar length / scatter grid width in characters.
    pub width: usize,
    /// Scatter grid height in rows.
    pub height: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            width: 50,
            height: 16,
        }
    }
}

impl ChartRenderer for TextRenderer {
    fn render(&self, table: &Table, spec: &ChartSpec) -> Result<String> {
        match spec.kind {
            ChartKind::CountDistribution => self.render_counts(table, spec),
            ChartKind::Scatter => self.render_scatter(table, spec),
        }
    }
}

impl TextRenderer {
    fn render_counts(&self, table: &Table, spec: &ChartSpec) -> Result<String> {
        let col = table.column(&spec.x).ok_or_else(|| ScourError::Schema {
            column: spec.x.clone(),
            stage: Stage::Report,
        })?;

        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for row in 0..col.len() {
            let label = match col.cell_text(row) {
                s if s.is_empty() => "<missing>".to_string(),
                s => s,
            };
            *counts.entry(label).or_insert(0) += 1;
        }

        // Numeric labels sort by value, everything else lexicographically.
        let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
        if col.is_numeric() {
            entries.sort_by(|a, b| {
                let av = a.0.parse::<f64>().unwrap_or(f64::MAX);
                let bv = b.0.parse::<f64>().unwrap_or(f64::MAX);
                av.partial_cmp(&bv).unwrap_or(std::cmp::Ordering::Equal)
            });
        } else {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
        }

        let max_count = entries.iter().map(|(_, c)| *c).max().unwrap_or(1);
        let label_width = entries.iter().map(|(l, _)| l.len()).max().unwrap_or(1);

        let mut out = String::new();
        out.push_str(&spec.title);
        out.push('\n');
        out.push_str(&"=".repeat(spec.title.len()));
        out.push('\n');

        for (label, count) in &entries {
            let bar_len = (count * self.width).div_ceil(max_count);
            out.push_str(&format!(
                "{:>width$} | {} {}\n",
                label,
                "#".repeat(bar_len),
                count,
                width = label_width
            ));
        }

        Ok(out)
    }

    fn render_scatter(&self, table: &Table, spec: &ChartSpec) -> Result<String> {
        let y_name = spec.y.as_deref().ok_or_else(|| {
            ScourError::Config("scatter chart requires a y column".to_string())
        })?;

        let points = scatter_points(table, &spec.x, y_name)?;
        if points.is_empty() {
            return Err(ScourError::EmptyData(format!(
                "no points to plot for '{}' vs '{}'",
                spec.x, y_name
            )));
        }

        let (x_min, x_max) = min_max(points.iter().map(|p| p.0));
        let (y_min, y_max) = min_max(points.iter().map(|p| p.1));
        let x_range = x_max - x_min;
        let y_range = y_max - y_min;

        let mut grid = vec![vec![' '; self.width]; self.height];
        for &(x, y) in &points {
            let col = if x_range > 0.0 {
                ((x - x_min) / x_range * (self.width - 1) as f64).round() as usize
            } else {
                self.width / 2
            };
            let row = if y_range > 0.0 {
                ((y - y_min) / y_range * (self.height - 1) as f64).round() as usize
            } else {
                self.height / 2
            };
            grid[self.height - 1 - row][col.min(self.width - 1)] = '*';
        }

        let mut out = String::new();
        out.push_str(&spec.title);
        out.push('\n');
        out.push_str(&"=".repeat(spec.title.len()));
        out.push('\n');

        for (i, line) in grid.iter().enumerate() {
            let label = if i == 0 {
                format!("{:>9.2}", y_max)
            } else if i == self.height - 1 {
                format!("{:>9.2}", y_min)
            } else {
                " ".repeat(9)
            };
            out.push_str(&format!(
                "{} |{}\n",
                label,
                line.iter().collect::<String>()
            ));
        }

        out.push_str(&format!("{} +{}\n", " ".repeat(9), "-".repeat(self.width)));
        out.push_str(&format!(
            "{}{:<half$}{:>half$}\n",
            " ".repeat(11),
            format!("{:.2}", x_min),
            format!("{:.2}", x_max),
            half = self.width / 2
        ));

        Ok(out)
    }
}

/// Paired (x, y) values where both cells are present and numeric.
fn scatter_points(table: &Table, x_name: &str, y_name: &str) -> Result<Vec<(f64, f64)>> {
    let x_col = numeric_column(table, x_name)?;
    let y_col = numeric_column(table, y_name)?;

    Ok(x_col
        .iter()
        .zip(y_col.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect())
}

fn numeric_column<'a>(table: &'a Table, name: &str) -> Result<&'a [Option<f64>]> {
    let col = table.column(name).ok_or_else(|| ScourError::Schema {
        column: name.to_string(),
        stage: Stage::Report,
    })?;

    match &col.values {
        crate::table::Values::Numeric(v) => Ok(v),
        crate::table::Values::Categorical(_) => Err(ScourError::Config(format!(
            "column '{}' is not numeric, cannot scatter it",
            name
        ))),
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
