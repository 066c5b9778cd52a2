//! A named column with an explicit type tag.

use serde::Serialize;

use super::types::{ColumnType, Value};

/// A single column of a table.
///
/// The type tag is recomputed whenever values are replaced, so it always
/// describes the values it sits next to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    kind: ColumnType,
    values: Vec<Value>,
}

impl Column {
    /// Create a column, inferring its type tag from the values.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let kind = ColumnType::infer(&values);
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Create a text column from string slices, treating none as missing.
    pub fn from_strs(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(name, values.iter().map(|v| Value::text(*v)).collect())
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runtime type tag.
    pub fn kind(&self) -> ColumnType {
        self.kind
    }

    /// Cell values in row order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Cell at a row index.
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing cells.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Returns true if every cell is missing.
    pub fn is_all_null(&self) -> bool {
        self.values.iter().all(Value::is_null)
    }

    /// Iterate the non-missing cells.
    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_null())
    }

    /// Same values under a new name.
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Same name with new values; the tag is re-derived.
    pub fn with_values(self, values: Vec<Value>) -> Self {
        Self::new(self.name, values)
    }

    /// Apply a function to every cell, producing a new column.
    pub fn map_values(self, f: impl FnMut(Value) -> Value) -> Self {
        let values = self.values.into_iter().map(f).collect();
        Self::new(self.name, values)
    }

    /// Keep only the rows whose mask entry is true.
    pub(crate) fn filter_rows(&self, keep: &[bool]) -> Self {
        let values = self
            .values
            .iter()
            .zip(keep)
            .filter(|(_, k)| **k)
            .map(|(v, _)| v.clone())
            .collect();
        Self::new(self.name.clone(), values)
    }
}
