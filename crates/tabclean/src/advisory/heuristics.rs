//! Rule-based observations about a raw table.

use crate::table::{ColumnType, Table};

/// Share of non-null values containing a comma above which a column is
/// flagged as holding formatted numbers.
const COMMA_SHARE_THRESHOLD: f64 = 0.2;

/// Fallback when no rule fires.
pub const NO_ISSUES: &str =
    "No major issues found. Consider standardizing column names and ensuring correct dtypes.";

/// Inspect a table and describe likely cleaning needs, one sentence each.
///
/// Never empty: when nothing is detected a single generic suggestion is
/// returned.
pub fn heuristic_suggestions(table: &Table) -> Vec<String> {
    let mut issues = Vec::new();

    if table.duplicate_row_count() > 0 {
        issues.push("There are duplicate rows in the original dataset.".to_string());
    }
    if table.has_nulls() {
        issues.push("There are missing values in one or more columns.".to_string());
    }

    for column in table.columns() {
        if column.kind() != ColumnType::Text {
            continue;
        }
        let values: Vec<String> = column.non_null().map(|v| v.render()).collect();
        if values.is_empty() {
            continue;
        }

        if values
            .iter()
            .any(|s| s.starts_with(' ') || s.ends_with(' '))
        {
            issues.push(format!(
                "Column '{}' may contain leading/trailing spaces.",
                column.name()
            ));
        }

        let with_commas = values.iter().filter(|s| s.contains(',')).count();
        if with_commas as f64 / values.len() as f64 > COMMA_SHARE_THRESHOLD {
            issues.push(format!(
                "Column '{}' may contain numeric values with commas.",
                column.name()
            ));
        }
    }

    if issues.is_empty() {
        issues.push(NO_ISSUES.to_string());
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Value};

    #[test]
    fn test_clean_table_gets_generic_suggestion() {
        let table = Table::new(vec![Column::from_strs("a", &["x", "y"])]).unwrap();
        assert_eq!(heuristic_suggestions(&table), vec![NO_ISSUES.to_string()]);
    }

    #[test]
    fn test_duplicates_and_nulls() {
        let table = Table::new(vec![Column::new(
            "a",
            vec![Value::text("x"), Value::text("x"), Value::Null],
        )])
        .unwrap();
        let issues = heuristic_suggestions(&table);
        assert_eq!(issues[0], "There are duplicate rows in the original dataset.");
        assert_eq!(issues[1], "There are missing values in one or more columns.");
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_spaces_and_commas() {
        let table = Table::new(vec![
            Column::from_strs("Name", &[" Ann", "Bob", "Cy"]),
            Column::from_strs("Price", &["1,200", "450", "3,000"]),
        ])
        .unwrap();
        let issues = heuristic_suggestions(&table);
        assert!(issues.contains(&"Column 'Name' may contain leading/trailing spaces.".to_string()));
        assert!(
            issues.contains(&"Column 'Price' may contain numeric values with commas.".to_string())
        );
    }

    #[test]
    fn test_comma_threshold_is_strict() {
        // 1 of 5 is exactly 20%, which does not fire.
        let table = Table::new(vec![Column::from_strs(
            "c",
            &["a,b", "c", "d", "e", "f"],
        )])
        .unwrap();
        assert_eq!(heuristic_suggestions(&table), vec![NO_ISSUES.to_string()]);
    }

    #[test]
    fn test_numeric_columns_skipped() {
        let table = Table::new(vec![Column::new(
            "n",
            vec![Value::Number(1.0), Value::Number(2.0)],
        )])
        .unwrap();
        assert_eq!(heuristic_suggestions(&table), vec![NO_ISSUES.to_string()]);
    }
}
