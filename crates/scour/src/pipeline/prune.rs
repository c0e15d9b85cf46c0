//! Identifier column removal.

use crate::error::{Result, ScourError, Stage};
use crate::table::Table;

/// Drop the configured identifier columns. A listed column absent from the
/// table is a [`ScourError::Schema`] error rather than a silent skip, since
/// silently ignoring it could mask an upstream schema change. Returns the
/// number of columns removed.
pub fn drop_identifiers(table: &mut Table, names: &[String]) -> Result<usize> {
    let mut removed = 0;

    for name in names {
        table.drop_column(name).ok_or_else(|| ScourError::Schema {
            column: name.clone(),
            stage: Stage::Prune,
        })?;
        removed += 1;
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    #[test]
    fn test_drops_listed_columns() {
        let mut table = Table::new(vec![
            Column::numeric("index", vec![Some(0.0), Some(1.0)]),
            Column::numeric("age", vec![Some(30.0), Some(40.0)]),
        ])
        .unwrap();

        assert_eq!(drop_identifiers(&mut table, &["index".to_string()]).unwrap(), 1);
        assert_eq!(table.names(), vec!["age"]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let mut table =
            Table::new(vec![Column::numeric("age", vec![Some(30.0)])]).unwrap();

        let err = drop_identifiers(&mut table, &["index".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            ScourError::Schema {
                stage: Stage::Prune,
                ..
            }
        ));
    }
}
