//! Missing-value canonicalization and imputation.
//!
//! Numeric columns are filled with the column mean, categorical columns with
//! the column mode. Mode ties resolve to the lexicographically smallest of
//! the equally frequent values (see [`crate::stats::mode`]).

use crate::error::{Result, ScourError, Stage};
use crate::stats;
use crate::table::{Table, Values};

/// Replace every categorical cell equal to the sentinel token with the
/// missing marker. Numeric columns already hold the marker wherever the
/// sentinel appeared, by construction of the loader. Returns the number of
/// cells canonicalized.
pub fn canonicalize_sentinel(table: &mut Table, sentinel: &str) -> usize {
    let mut changed = 0;

    for col in table.columns_mut() {
        if let Values::Categorical(values) = &mut col.values {
            for cell in values.iter_mut() {
                if cell.as_deref().is_some_and(|v| v.trim() == sentinel) {
                    *cell = None;
                    changed += 1;
                }
            }
        }
    }

    changed
}

/// Impute every missing value in the table. Returns the number of values
/// imputed. After this runs no column contains the missing marker.
///
/// A column with no non-missing values has an undefined mean/mode and fails
/// with [`ScourError::DegenerateColumn`].
pub fn impute(table: &mut Table) -> Result<usize> {
    let mut imputed = 0;

    for col in table.columns_mut() {
        match &mut col.values {
            Values::Numeric(values) => {
                let present: Vec<f64> = values.iter().flatten().copied().collect();
                let mean = stats::mean(&present).ok_or_else(|| {
                    ScourError::DegenerateColumn {
                        column: col.name.clone(),
                        stage: Stage::Impute,
                        reason: "all values missing, mean is undefined".to_string(),
                    }
                })?;

                for cell in values.iter_mut() {
                    if cell.is_none() {
                        *cell = Some(mean);
                        imputed += 1;
                    }
                }
            }
            Values::Categorical(values) => {
                let mode = stats::mode(values.iter().flatten().map(|s| s.as_str()))
                    .ok_or_else(|| ScourError::DegenerateColumn {
                        column: col.name.clone(),
                        stage: Stage::Impute,
                        reason: "all values missing, mode is undefined".to_string(),
                    })?;

                for cell in values.iter_mut() {
                    if cell.is_none() {
                        *cell = Some(mode.clone());
                        imputed += 1;
                    }
                }
            }
        }
    }

    Ok(imputed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_canonicalize_sentinel() {
        let mut table = Table::new(vec![Column::categorical(
            "c",
            vec![Some("?".into()), Some("x".into()), Some("?".into())],
        )])
        .unwrap();

        assert_eq!(canonicalize_sentinel(&mut table, "?"), 2);
        assert_eq!(table.column("c").unwrap().missing_count(), 2);
    }

    #[test]
    fn test_numeric_mean_imputation() {
        let mut table = Table::new(vec![Column::numeric(
            "v",
            vec![Some(1.0), None, Some(3.0)],
        )])
        .unwrap();

        assert_eq!(impute(&mut table).unwrap(), 1);
        let values = table.column("v").unwrap().numeric_values().unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_categorical_mode_imputation() {
        let mut table = Table::new(vec![Column::categorical(
            "c",
            vec![Some("a".into()), Some("a".into()), Some("b".into()), None],
        )])
        .unwrap();

        impute(&mut table).unwrap();
        let col = table.column("c").unwrap();
        assert_eq!(col.missing_count(), 0);
        assert_eq!(col.cell_text(3), "a");
    }

    #[test]
    fn test_mode_tie_breaks_deterministically() {
        // "b" appears first but "a" is lexicographically smaller.
        let mut table = Table::new(vec![Column::categorical(
            "c",
            vec![Some("b".into()), Some("a".into()), None, None],
        )])
        .unwrap();

        impute(&mut table).unwrap();
        let col = table.column("c").unwrap();
        assert_eq!(col.cell_text(2), "a");
        assert_eq!(col.cell_text(3), "a");
    }

    #[test]
    fn test_all_missing_numeric_column_fails() {
        let mut table = Table::new(vec![Column::numeric("v", vec![None, None])]).unwrap();

        let err = impute(&mut table).unwrap_err();
        assert!(matches!(
            err,
            ScourError::DegenerateColumn {
                stage: Stage::Impute,
                ..
            }
        ));
    }

    #[test]
    fn test_all_missing_categorical_column_fails() {
        let mut table =
            Table::new(vec![Column::categorical("c", vec![None, None])]).unwrap();

        assert!(impute(&mut table).is_err());
    }

    #[test]
    fn test_no_missing_is_a_noop() {
        let mut table = Table::new(vec![Column::numeric(
            "v",
            vec![Some(1.0), Some(2.0)],
        )])
        .unwrap();

        assert_eq!(impute(&mut table).unwrap(), 0);
    }
}
