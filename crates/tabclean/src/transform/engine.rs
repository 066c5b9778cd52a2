//! Cleaning pipeline that runs the enabled steps in a fixed order.

use tracing::debug;

use crate::table::{ColumnType, Table, Value};

use super::coerce::{coerce_datetime, fix_numeric, looks_like_dates};
use super::config::CleanConfig;
use super::names::standardize_column_name;

/// Runs the cleaning steps selected by a [`CleanConfig`].
///
/// Steps always run in this order: trim, standardize names, drop empty
/// rows, drop empty columns, drop duplicates, fix numbers, parse dates.
/// No step fails; values that cannot be converted become nulls.
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    config: CleanConfig,
}

impl Cleaner {
    /// Create a cleaner with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cleaner with a custom configuration.
    pub fn with_config(config: CleanConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CleanConfig {
        &self.config
    }

    /// Produce a cleaned copy of the table.
    pub fn clean(&self, table: &Table) -> Table {
        let config = &self.config;
        let mut out = table.clone();

        if config.trim {
            out = trim_text(out);
        }
        if config.standardize_names {
            out = standardize_names(out);
        }
        if config.drop_empty_rows {
            out = drop_empty_rows(out);
        }
        if config.drop_empty_cols {
            out = drop_empty_columns(out);
        }
        if config.drop_duplicates {
            out = drop_duplicate_rows(out);
        }
        if config.fix_numbers {
            out = fix_numeric_columns(out);
        }
        if config.parse_dates {
            out = parse_date_columns(out);
        }

        debug!(
            rows_before = table.row_count(),
            rows_after = out.row_count(),
            cols_before = table.column_count(),
            cols_after = out.column_count(),
            "cleaning finished"
        );
        out
    }
}

/// Clean a table with the given configuration.
pub fn clean(table: &Table, config: &CleanConfig) -> Table {
    Cleaner::with_config(*config).clean(table)
}

/// Strip surrounding whitespace from every text cell.
pub fn trim_text(table: Table) -> Table {
    let mut trimmed = 0usize;
    let columns = table
        .into_columns()
        .into_iter()
        .map(|col| {
            if col.kind() != ColumnType::Text {
                return col;
            }
            col.map_values(|v| match v {
                Value::Text(s) if s.trim().len() != s.len() => {
                    trimmed += 1;
                    Value::Text(s.trim().to_string())
                }
                other => other,
            })
        })
        .collect();

    debug!(cells = trimmed, "trimmed text cells");
    Table::from_columns_unchecked(columns)
}

/// Rename every column to its standardized form.
pub fn standardize_names(table: Table) -> Table {
    let columns = table
        .into_columns()
        .into_iter()
        .map(|col| {
            let name = standardize_column_name(col.name());
            col.renamed(name)
        })
        .collect();
    let out = Table::from_columns_unchecked(columns);
    debug!(names = ?out.column_names(), "standardized column names");
    out
}

/// Remove rows where every cell is missing.
pub fn drop_empty_rows(table: Table) -> Table {
    let keep: Vec<bool> = table
        .rows()
        .map(|row| !row.iter().all(|v| v.is_null()))
        .collect();
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped == 0 {
        return table;
    }
    debug!(rows = dropped, "dropped empty rows");
    table.filter_rows(&keep)
}

/// Remove columns where every cell is missing.
pub fn drop_empty_columns(table: Table) -> Table {
    let (kept, dropped): (Vec<_>, Vec<_>) = table
        .into_columns()
        .into_iter()
        .partition(|col| !col.is_all_null());
    if !dropped.is_empty() {
        debug!(
            columns = ?dropped.iter().map(|c| c.name()).collect::<Vec<_>>(),
            "dropped empty columns"
        );
    }
    Table::from_columns_unchecked(kept)
}

/// Remove rows that repeat an earlier row exactly, keeping the first.
pub fn drop_duplicate_rows(table: Table) -> Table {
    let keep = table.first_occurrence_mask();
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped == 0 {
        return table;
    }
    debug!(rows = dropped, "dropped duplicate rows");
    table.filter_rows(&keep)
}

/// Convert every non-numeric column that has at least one numeric value.
pub fn fix_numeric_columns(table: Table) -> Table {
    let columns = table
        .into_columns()
        .into_iter()
        .map(|col| {
            let before = col.kind();
            let fixed = fix_numeric(col);
            if before != fixed.kind() {
                debug!(column = fixed.name(), "converted column to numeric");
            }
            fixed
        })
        .collect();
    Table::from_columns_unchecked(columns)
}

/// Convert text columns whose leading values read as dates.
pub fn parse_date_columns(table: Table) -> Table {
    let columns = table
        .into_columns()
        .into_iter()
        .map(|col| {
            if col.kind() == ColumnType::Text && looks_like_dates(&col) {
                debug!(column = col.name(), "parsed column as dates");
                coerce_datetime(col, None)
            } else {
                col
            }
        })
        .collect();
    Table::from_columns_unchecked(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn table(columns: Vec<Column>) -> Table {
        Table::new(columns).unwrap()
    }

    #[test]
    fn test_trim_only_text() {
        let t = table(vec![
            Column::from_strs("a", &["  x ", "y"]),
            Column::new("n", vec![Value::Number(1.0), Value::Number(2.0)]),
        ]);
        let out = trim_text(t);
        assert_eq!(out.get(0, 0), Some(&Value::text("x")));
        assert_eq!(out.get(0, 1), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_drop_empty_rows_and_columns() {
        let t = table(vec![
            Column::new("a", vec![Value::text("x"), Value::Null, Value::text("z")]),
            Column::new("b", vec![Value::Null, Value::Null, Value::Null]),
        ]);
        let out = drop_empty_columns(drop_empty_rows(t));
        assert_eq!(out.column_names(), vec!["a"]);
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let t = table(vec![
            Column::from_strs("k", &["a", "a", "b"]),
            Column::new(
                "v",
                vec![Value::Number(1.0), Value::Number(1.0), Value::Number(2.0)],
            ),
        ]);
        let out = drop_duplicate_rows(t);
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.row(0).unwrap(), vec![&Value::text("a"), &Value::Number(1.0)]);
        assert_eq!(out.row(1).unwrap(), vec![&Value::text("b"), &Value::Number(2.0)]);
    }

    #[test]
    fn test_duplicates_treat_nulls_equal() {
        let t = table(vec![Column::new(
            "k",
            vec![Value::Null, Value::Null, Value::text("x")],
        )]);
        assert_eq!(drop_duplicate_rows(t).row_count(), 2);
    }

    #[test]
    fn test_pipeline_order_standardizes_before_dropping() {
        let t = table(vec![
            Column::from_strs("Full Name", &[" Ann ", "Ann", "Bob"]),
            Column::from_strs("Amount", &["1,200", "1200", "3"]),
        ]);
        let out = clean(&t, &CleanConfig::default());
        assert_eq!(out.column_names(), vec!["full_name", "amount"]);
        // Duplicates are removed before numbers are fixed, so "1,200" and
        // "1200" survive as separate rows.
        assert_eq!(out.row_count(), 3);
        assert_eq!(out.column("amount").unwrap().kind(), ColumnType::Number);
    }

    #[test]
    fn test_clean_with_nothing_enabled_is_identity() {
        let t = table(vec![Column::from_strs(" A ", &[" x ", " x "])]);
        assert_eq!(clean(&t, &CleanConfig::none()), t);
    }

    #[test]
    fn test_parse_dates_step() {
        let t = table(vec![
            Column::from_strs("when", &["2024-01-01", "2024-01-02", "2024-01-03", "soon"]),
            Column::from_strs("what", &["a", "b", "c", "d"]),
        ]);
        let out = parse_date_columns(t);
        assert_eq!(out.columns()[0].kind(), ColumnType::Timestamp);
        assert_eq!(out.get(3, 0), Some(&Value::Null));
        assert_eq!(out.columns()[1].kind(), ColumnType::Text);
    }

    #[test]
    fn test_clean_does_not_touch_input() {
        let t = table(vec![Column::from_strs("A B", &[" 1 ", " 1 "])]);
        let snapshot = t.clone();
        let _ = clean(&t, &CleanConfig::all());
        assert_eq!(t, snapshot);
    }
}
