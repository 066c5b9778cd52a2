//! Column-oriented table.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use super::column::Column;
use super::types::Value;

/// Shape violations when assembling a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A column's length differs from the first column's.
    #[error("column '{column}' has {found} values, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A row has a different width than the header.
    #[error("row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// An ordered set of equally long columns.
///
/// Tables are values: every transform returns a new table and leaves its
/// input alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, checking that all columns have the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(TableError::RaggedColumn {
                    column: bad.name().to_string(),
                    expected,
                    found: bad.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Build a table from a header and row-major cells.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, TableError> {
        let width = headers.len();
        let mut buffers: Vec<Vec<Value>> = (0..width)
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(TableError::RaggedRow {
                    row: row_idx,
                    expected: width,
                    found: row.len(),
                });
            }
            for (buffer, value) in buffers.iter_mut().zip(row) {
                buffer.push(value);
            }
        }

        let columns = headers
            .into_iter()
            .zip(buffers)
            .map(|(name, values)| Column::new(name, values))
            .collect();
        Ok(Self { columns })
    }

    /// Reassemble from columns produced by a step that kept lengths intact.
    pub(crate) fn from_columns_unchecked(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].len() == w[1].len()),
            "columns must have equal length"
        );
        Self { columns }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Consume the table, returning its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// All column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Position of the first column with this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// First column with this name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Returns true if some column has this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// A specific cell.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.columns.get(col).and_then(|c| c.get(row))
    }

    /// The cells of one row, in column order.
    pub fn row(&self, row: usize) -> Option<Vec<&Value>> {
        if row >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values()[row]).collect())
    }

    /// Iterate rows as vectors of cell references.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.row_count()).map(move |r| self.columns.iter().map(|c| &c.values()[r]).collect())
    }

    /// Total number of missing cells.
    pub fn null_count(&self) -> usize {
        self.columns.iter().map(Column::null_count).sum()
    }

    /// Returns true if any cell is missing.
    pub fn has_nulls(&self) -> bool {
        self.columns.iter().any(|c| c.null_count() > 0)
    }

    /// Mask marking the first occurrence of every distinct row.
    pub fn first_occurrence_mask(&self) -> Vec<bool> {
        let mut seen = HashSet::with_capacity(self.row_count());
        self.rows().map(|row| seen.insert(row)).collect()
    }

    /// Number of rows that repeat an earlier row exactly.
    pub fn duplicate_row_count(&self) -> usize {
        self.first_occurrence_mask().iter().filter(|k| !**k).count()
    }

    /// New table keeping only rows whose mask entry is true.
    pub fn filter_rows(&self, keep: &[bool]) -> Table {
        Table {
            columns: self.columns.iter().map(|c| c.filter_rows(keep)).collect(),
        }
    }

    /// New table with a column replaced by a transformed copy.
    pub fn map_column(&self, index: usize, f: impl FnOnce(Column) -> Column) -> Table {
        let mut columns = self.columns.clone();
        if index < columns.len() {
            let column = columns.remove(index);
            columns.insert(index, f(column));
        }
        Self::from_columns_unchecked(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            Column::from_strs("name", &["a", "a", "b"]),
            Column::new(
                "n",
                vec![Value::Number(1.0), Value::Number(1.0), Value::Number(2.0)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = Table::new(vec![
            Column::from_strs("a", &["1", "2"]),
            Column::from_strs("b", &["1"]),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::RaggedColumn { found: 1, .. }));
    }

    #[test]
    fn test_from_rows() {
        let table = Table::from_rows(
            vec!["x".to_string(), "y".to_string()],
            vec![
                vec![Value::text("1"), Value::Null],
                vec![Value::text("2"), Value::text("b")],
            ],
        )
        .unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(1, 1), Some(&Value::text("b")));
        assert_eq!(table.null_count(), 1);
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Table::from_rows(vec!["x".to_string()], vec![vec![]]).unwrap_err();
        assert!(matches!(err, TableError::RaggedRow { row: 0, .. }));
    }

    #[test]
    fn test_duplicate_detection() {
        let table = sample();
        assert_eq!(table.first_occurrence_mask(), vec![true, false, true]);
        assert_eq!(table.duplicate_row_count(), 1);
    }

    #[test]
    fn test_filter_rows_leaves_input_intact() {
        let table = sample();
        let filtered = table.filter_rows(&[false, true, true]);
        assert_eq!(filtered.row_count(), 2);
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::default();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.rows().count(), 0);
    }
}
