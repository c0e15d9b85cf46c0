//! In-memory table model: ordered, named, typed columns with a shared row
//! count.

mod column;

pub use column::{Column, NumericSummary, Values};

use crate::error::{Result, ScourError};

/// An ordered collection of named columns. Rows are positionally aligned
/// across columns; the table is mutated in place as it moves through the
/// pipeline, with exactly one owner at a time.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create a table, checking that every column has the same row count.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(ScourError::EmptyData("No columns".to_string()));
        }

        let rows = columns[0].len();
        for col in &columns {
            if col.len() != rows {
                return Err(ScourError::Shape(format!(
                    "column '{}' has {} rows, expected {}",
                    col.name,
                    col.len(),
                    rows
                )));
            }
        }

        Ok(Self { columns })
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Column names in table order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Names of the columns currently classified as numeric.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.clone())
            .collect()
    }

    /// Remove a column by name, returning it if present.
    pub fn drop_column(&mut self, name: &str) -> Option<Column> {
        let index = self.column_index(name)?;
        Some(self.columns.remove(index))
    }

    /// Keep only the rows whose flag is `true`, preserving order.
    /// `keep` must have one flag per row.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        for col in &mut self.columns {
            match &mut col.values {
                Values::Numeric(v) => {
                    *v = std::mem::take(v)
                        .into_iter()
                        .zip(keep)
                        .filter_map(|(x, &k)| k.then_some(x))
                        .collect();
                }
                Values::Categorical(v) => {
                    *v = std::mem::take(v)
                        .into_iter()
                        .zip(keep)
                        .filter_map(|(x, &k)| k.then_some(x))
                        .collect();
                }
            }
        }
    }

    /// Per-column missing value counts, in table order.
    pub fn missing_counts(&self) -> Vec<(&str, usize)> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.missing_count()))
            .collect()
    }

    /// Numeric summaries for every numeric column with at least one value.
    pub fn summaries(&self) -> Vec<(&str, NumericSummary)> {
        self.columns
            .iter()
            .filter_map(|c| c.summary().map(|s| (c.name.as_str(), s)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(2.0), Some(3.0)]),
            Column::categorical(
                "b",
                vec![Some("x".into()), None, Some("y".into())],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_ragged_columns() {
        let result = Table::new(vec![
            Column::numeric("a", vec![Some(1.0)]),
            Column::numeric("b", vec![Some(1.0), Some(2.0)]),
        ]);
        assert!(matches!(result, Err(ScourError::Shape(_))));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            Table::new(Vec::new()),
            Err(ScourError::EmptyData(_))
        ));
    }

    #[test]
    fn test_accessors() {
        let table = sample_table();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.names(), vec!["a", "b"]);
        assert_eq!(table.column_index("b"), Some(1));
        assert!(table.column("missing").is_none());
        assert_eq!(table.numeric_column_names(), vec!["a"]);
    }

    #[test]
    fn test_retain_rows_preserves_order() {
        let mut table = sample_table();
        table.retain_rows(&[true, false, true]);
        assert_eq!(table.row_count(), 2);
        let a = table.column("a").unwrap().numeric_values().unwrap();
        assert_eq!(a, vec![1.0, 3.0]);
    }

    #[test]
    fn test_drop_column() {
        let mut table = sample_table();
        assert!(table.drop_column("a").is_some());
        assert_eq!(table.names(), vec!["b"]);
        assert!(table.drop_column("a").is_none());
    }

    #[test]
    fn test_missing_counts() {
        let table = sample_table();
        assert_eq!(table.missing_counts(), vec![("a", 0), ("b", 1)]);
    }
}
