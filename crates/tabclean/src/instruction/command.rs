//! The fixed instruction grammar.
//!
//! Each recognized phrase maps to one [`Command`] variant. Matching is
//! case-insensitive and independent: one instruction string can yield
//! several commands, and text that matches nothing yields none. The text is
//! only ever matched against these patterns.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::table::Value;
use crate::transform::coerce::parse_number;

static RENAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)rename\s+(.+)").unwrap());
static DROP_COLUMNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)drop\s+columns?\s*:\s*(.+)").unwrap());
static DROP_NULL_ROWS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)drop\s+rows\s+where\s+(.+?)\s+is\s+null").unwrap());
static DROP_EQUAL_ROWS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)drop\s+rows\s+where\s+(.+?)\s*=\s*(.+)").unwrap());
static FILL_NULLS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)fill\s+nulls\s+in\s+(.+?)\s+with\s+(.+)").unwrap());
static CONVERT_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)convert\s+(.+?)\s+to\s+numeric").unwrap());
static PARSE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)parse\s+(.+?)\s+as\s+date(?:\s+format\s+(.+))?").unwrap()
});

/// A single table edit recognized in an instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// `rename A -> a, B -> b`
    Rename { mapping: IndexMap<String, String> },
    /// `drop columns: X, Y`
    DropColumns { columns: Vec<String> },
    /// `drop rows where COL is null`
    DropRowsWhereNull { column: String },
    /// `drop rows where COL = VALUE`
    DropRowsWhereEquals { column: String, value: String },
    /// `fill nulls in COL with VALUE`
    FillNulls { column: String, value: Value },
    /// `convert COL to numeric`
    ConvertNumeric { column: String },
    /// `parse COL as date [format FMT]`
    ParseDate {
        column: String,
        format: Option<String>,
    },
}

/// Extract every recognized command from an instruction string, in the
/// order they are applied.
pub fn parse_instructions(text: &str) -> Vec<Command> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut commands = Vec::new();

    if let Some(caps) = RENAME.captures(text) {
        let mapping = parse_rename_pairs(&caps[1]);
        if !mapping.is_empty() {
            commands.push(Command::Rename { mapping });
        }
    }

    if let Some(caps) = DROP_COLUMNS.captures(text) {
        let columns = split_items(&caps[1]);
        if !columns.is_empty() {
            commands.push(Command::DropColumns { columns });
        }
    }

    if let Some(caps) = DROP_NULL_ROWS.captures(text) {
        commands.push(Command::DropRowsWhereNull {
            column: caps[1].trim().to_string(),
        });
    }

    if let Some(caps) = DROP_EQUAL_ROWS.captures(text) {
        commands.push(Command::DropRowsWhereEquals {
            column: caps[1].trim().to_string(),
            value: strip_quotes(&caps[2]).to_string(),
        });
    }

    if let Some(caps) = FILL_NULLS.captures(text) {
        commands.push(Command::FillNulls {
            column: caps[1].trim().to_string(),
            value: fill_value(strip_quotes(&caps[2])),
        });
    }

    if let Some(caps) = CONVERT_NUMERIC.captures(text) {
        commands.push(Command::ConvertNumeric {
            column: caps[1].trim().to_string(),
        });
    }

    if let Some(caps) = PARSE_DATE.captures(text) {
        let format = caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .filter(|f| !f.is_empty());
        commands.push(Command::ParseDate {
            column: caps[1].trim().to_string(),
            format,
        });
    }

    commands
}

/// Split on commas and semicolons, trimming and dropping empty items.
fn split_items(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read `left -> right` pairs. Items without an arrow are ignored.
///
/// When no item forms a pair, the whole remainder is read as one pair so
/// that column names containing commas can be renamed.
fn parse_rename_pairs(remainder: &str) -> IndexMap<String, String> {
    let mut mapping = IndexMap::new();
    for item in split_items(remainder) {
        if let Some((left, right)) = split_pair(&item) {
            mapping.insert(left, right);
        }
    }

    if mapping.is_empty() {
        if let Some((left, right)) = split_pair(remainder) {
            mapping.insert(left, right);
        }
    }
    mapping
}

fn split_pair(item: &str) -> Option<(String, String)> {
    let (left, right) = item.split_once("->")?;
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left.to_string(), right.to_string()))
}

fn strip_quotes(s: &str) -> &str {
    s.trim().trim_matches(|c| c == '\'' || c == '"')
}

/// A fill value is numeric when it is all digits or has a decimal point and
/// parses; anything else stays text.
fn fill_value(raw: &str) -> Value {
    let all_digits = !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit());
    if all_digits || raw.contains('.') {
        if let Some(n) = parse_number(raw) {
            return Value::Number(n);
        }
    }
    Value::text(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_unsupported() {
        assert!(parse_instructions("").is_empty());
        assert!(parse_instructions("   ").is_empty());
        assert!(parse_instructions("do something unsupported").is_empty());
    }

    #[test]
    fn test_rename_single() {
        let commands = parse_instructions("rename Full Name -> full_name");
        let mut expected = IndexMap::new();
        expected.insert("Full Name".to_string(), "full_name".to_string());
        assert_eq!(commands, vec![Command::Rename { mapping: expected }]);
    }

    #[test]
    fn test_rename_multiple_and_junk() {
        let commands = parse_instructions("RENAME A->a; B -> b, junk, -> nothing");
        match &commands[0] {
            Command::Rename { mapping } => {
                assert_eq!(mapping.len(), 2);
                assert_eq!(mapping["A"], "a");
                assert_eq!(mapping["B"], "b");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rename_name_with_comma() {
        let commands = parse_instructions("rename Last, First -> name");
        let mut expected = IndexMap::new();
        expected.insert("Last, First".to_string(), "name".to_string());
        assert_eq!(commands, vec![Command::Rename { mapping: expected }]);
    }

    #[test]
    fn test_rename_empty_side_reads_whole_remainder() {
        // Neither "a" nor "-> b" is a pair on its own
        let commands = parse_instructions("rename a, -> b");
        let mut expected = IndexMap::new();
        expected.insert("a,".to_string(), "b".to_string());
        assert_eq!(commands, vec![Command::Rename { mapping: expected }]);

        assert!(parse_instructions("rename -> b").is_empty());
    }

    #[test]
    fn test_rename_without_arrow_ignored() {
        assert!(parse_instructions("rename everything please").is_empty());
    }

    #[test]
    fn test_drop_columns() {
        assert_eq!(
            parse_instructions("Drop Columns: Email, Notes"),
            vec![Command::DropColumns {
                columns: vec!["Email".to_string(), "Notes".to_string()]
            }]
        );
        assert_eq!(
            parse_instructions("drop column:Email"),
            vec![Command::DropColumns {
                columns: vec!["Email".to_string()]
            }]
        );
    }

    #[test]
    fn test_drop_rows() {
        assert_eq!(
            parse_instructions("drop rows where Email is null"),
            vec![Command::DropRowsWhereNull {
                column: "Email".to_string()
            }]
        );
        assert_eq!(
            parse_instructions("drop rows where Status = 'inactive'"),
            vec![Command::DropRowsWhereEquals {
                column: "Status".to_string(),
                value: "inactive".to_string()
            }]
        );
    }

    #[test]
    fn test_fill_value_coercion() {
        let parsed = parse_instructions("fill nulls in Amount with 0");
        assert_eq!(
            parsed,
            vec![Command::FillNulls {
                column: "Amount".to_string(),
                value: Value::Number(0.0)
            }]
        );
        assert_eq!(fill_value("2.5"), Value::Number(2.5));
        assert_eq!(fill_value("-5"), Value::text("-5"));
        assert_eq!(fill_value("a.b"), Value::text("a.b"));
        assert_eq!(fill_value("unknown"), Value::text("unknown"));
    }

    #[test]
    fn test_fill_quoted_text() {
        let parsed = parse_instructions("fill nulls in City with \"Unknown\"");
        assert_eq!(
            parsed,
            vec![Command::FillNulls {
                column: "City".to_string(),
                value: Value::text("Unknown")
            }]
        );
    }

    #[test]
    fn test_convert_and_parse() {
        assert_eq!(
            parse_instructions("convert Amount to numeric"),
            vec![Command::ConvertNumeric {
                column: "Amount".to_string()
            }]
        );
        assert_eq!(
            parse_instructions("parse Signup Date as date format %d/%m/%Y"),
            vec![Command::ParseDate {
                column: "Signup Date".to_string(),
                format: Some("%d/%m/%Y".to_string())
            }]
        );
        assert_eq!(
            parse_instructions("parse joined as date"),
            vec![Command::ParseDate {
                column: "joined".to_string(),
                format: None
            }]
        );
    }

    #[test]
    fn test_multiple_patterns_in_one_instruction() {
        let commands =
            parse_instructions("convert Amount to numeric and parse Joined as date");
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], Command::ConvertNumeric { .. }));
        assert!(matches!(commands[1], Command::ParseDate { .. }));
    }
}
