//! Before/after data-quality report.

use std::fmt::Write;

use crate::table::Table;

/// Sample values shown per column.
const SAMPLES_PER_COLUMN: usize = 3;

struct Profile {
    rows: usize,
    cols: usize,
    nulls: usize,
    duplicates: usize,
}

impl Profile {
    fn of(table: &Table) -> Self {
        Self {
            rows: table.row_count(),
            cols: table.column_count(),
            nulls: table.null_count(),
            duplicates: table.duplicate_row_count(),
        }
    }

    fn line(&self, label: &str) -> String {
        format!(
            "**{}**: {} rows × {} cols | Null values: {} | Duplicates: {}",
            label, self.rows, self.cols, self.nulls, self.duplicates
        )
    }
}

/// Markdown comparison of an original table and its cleaned version.
pub fn quality_report(original: &Table, cleaned: &Table) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "{}", Profile::of(original).line("Original"));
    let _ = writeln!(md, "{}", Profile::of(cleaned).line("Cleaned"));

    md.push_str("\n**Column types (cleaned)**\n");
    for column in cleaned.columns() {
        let _ = writeln!(md, "- `{}`: {}", column.name(), column.kind());
    }

    md.push_str("\n**Sample values per column (cleaned)**\n");
    for column in cleaned.columns() {
        let samples: Vec<String> = column
            .non_null()
            .take(SAMPLES_PER_COLUMN)
            .map(|v| format!("`{}`", v))
            .collect();
        let _ = writeln!(md, "- `{}`: {}", column.name(), samples.join(", "));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Value};

    #[test]
    fn test_report_counts_and_samples() {
        let original = Table::new(vec![
            Column::from_strs("Name", &["a", "a", "b", "c", "d"]),
            Column::new(
                "Score",
                vec![
                    Value::Number(1.0),
                    Value::Number(1.0),
                    Value::Null,
                    Value::Number(3.5),
                    Value::Number(4.0),
                ],
            ),
        ])
        .unwrap();
        let cleaned = original.filter_rows(&[true, false, true, true, true]);

        let report = quality_report(&original, &cleaned);
        assert!(report.contains("**Original**: 5 rows × 2 cols | Null values: 1 | Duplicates: 1"));
        assert!(report.contains("**Cleaned**: 4 rows × 2 cols | Null values: 1 | Duplicates: 0"));
        assert!(report.contains("- `Score`: number"));
        assert!(report.contains("- `Name`: `a`, `b`, `c`\n"));
        assert!(report.contains("- `Score`: `1`, `3.5`, `4`\n"));
    }
}
