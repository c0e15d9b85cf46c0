//! IQR outlier filtering.
//!
//! Fences are computed once for every numeric column before any removal,
//! then all flagged rows are dropped in a single pass. Recomputing on the
//! trimmed distribution is deliberately not done; the run is a one-shot
//! batch computation.

use crate::table::{Table, Values};

/// Per-column fences held while scanning rows.
struct ColumnFences {
    index: usize,
    lower: f64,
    upper: f64,
}

/// Remove every row holding at least one numeric value strictly outside its
/// column's IQR fences. Survivor order is preserved. Returns the number of
/// rows removed.
///
/// A column with zero IQR flags any value different from its (equal)
/// quartiles; that is a consequence of the fence formula, not a special
/// case.
pub fn filter(table: &mut Table, multiplier: f64) -> usize {
    let mut fences = Vec::new();

    for (index, col) in table.columns().iter().enumerate() {
        if !col.is_numeric() {
            continue;
        }
        if let Some(summary) = col.summary() {
            let (lower, upper) = summary.fences(multiplier);
            fences.push(ColumnFences { index, lower, upper });
        }
    }

    let rows = table.row_count();
    let mut keep = vec![true; rows];

    for f in &fences {
        if let Values::Numeric(values) = &table.columns()[f.index].values {
            for (row, cell) in values.iter().enumerate() {
                if let Some(v) = cell {
                    if *v < f.lower || *v > f.upper {
                        keep[row] = false;
                    }
                }
            }
        }
    }

    table.retain_rows(&keep);
    rows - table.row_count()
}
