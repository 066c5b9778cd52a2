//! Delimited text parser with delimiter detection.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Result, TabCleanError};
use crate::table::{Column, ColumnType, Table, Value};
use crate::transform::coerce::parse_number;

use super::source::SourceMetadata;
use super::spreadsheet;

/// Delimiters to try when auto-detecting, in tie-break order.
const DELIMITERS: &[u8] = &[b',', b';', b'|', b'\t'];

/// Delimiter used when no candidate appears in the sample.
const DEFAULT_DELIMITER: u8 = b',';

/// Cell contents read as missing values.
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#NA", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Spreadsheet file extensions handed to the spreadsheet reader.
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Turn columns whose values all read as numbers into numeric columns.
    pub infer_types: bool,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            infer_types: true,
            quote: b'"',
        }
    }
}

/// Parses tabular files into [`Table`]s.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a delimited or spreadsheet file and return the table and
    /// metadata. The format is chosen by file extension.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| TabCleanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let hash = content_hash(&contents);
        let size_bytes = contents.len() as u64;

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let (table, format) = if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
            (spreadsheet::read_first_sheet(path)?, extension)
        } else {
            let text = decode(&contents)?;
            let delimiter = self
                .config
                .delimiter
                .unwrap_or_else(|| detect_delimiter(text));
            let table = self.parse_delimited(text, delimiter)?;
            (table, format_name(delimiter).to_string())
        };

        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            format = %format,
            "loaded table"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );
        Ok((table, metadata))
    }

    /// Parse UTF-8 bytes of delimited text.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        self.parse_str(decode(bytes)?)
    }

    /// Parse delimited text, detecting the delimiter unless configured.
    pub fn parse_str(&self, text: &str) -> Result<Table> {
        let delimiter = self
            .config
            .delimiter
            .unwrap_or_else(|| detect_delimiter(text));
        self.parse_delimited(text, delimiter)
    }

    /// Parse delimited text with a known delimiter.
    pub fn parse_delimited(&self, text: &str, delimiter: u8) -> Result<Table> {
        debug!(delimiter = ?(delimiter as char), "parsing delimited text");

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records();

        let first = match records.next() {
            Some(record) => record?,
            None => return Err(TabCleanError::EmptyData("No columns found".to_string())),
        };

        let mut rows: Vec<Vec<Value>> = Vec::new();
        let headers: Vec<String> = if self.config.has_header {
            first
                .iter()
                .enumerate()
                .map(|(i, s)| header_name(i, s))
                .collect()
        } else {
            let generated = (0..first.len())
                .map(|i| format!("column_{}", i + 1))
                .collect();
            rows.push(first.iter().map(cell_value).collect());
            generated
        };

        if headers.is_empty() {
            return Err(TabCleanError::EmptyData("No columns found".to_string()));
        }
        let expected_cols = headers.len();

        for result in records {
            let record = result?;
            if record.len() > expected_cols {
                let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
                return Err(TabCleanError::Parse {
                    row: line,
                    column: expected_cols + 1,
                    message: format!(
                        "expected {} fields, found {}",
                        expected_cols,
                        record.len()
                    ),
                });
            }

            let mut row: Vec<Value> = record.iter().map(cell_value).collect();
            // Short rows are padded with missing values
            row.resize(expected_cols, Value::Null);
            rows.push(row);
        }

        let table = Table::from_rows(dedupe_headers(headers), rows)?;
        if self.config.infer_types {
            Ok(infer_numeric_columns(table))
        } else {
            Ok(table)
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the delimiter that occurs most often in the sample.
///
/// Candidates are comma, semicolon, pipe and tab, in that order; the first
/// one reaching the highest count wins. Falls back to comma when none
/// occurs at all.
pub fn detect_delimiter(sample: &str) -> u8 {
    let mut best_delimiter = DEFAULT_DELIMITER;
    let mut best_count = 0;

    for &delim in DELIMITERS {
        let count = sample.bytes().filter(|&b| b == delim).count();
        if count > best_count {
            best_count = count;
            best_delimiter = delim;
        }
    }

    best_delimiter
}

/// Check if a raw cell represents a missing value.
pub fn is_null_marker(value: &str) -> bool {
    NULL_MARKERS.contains(&value)
}

/// SHA-256 of raw file contents, prefixed with the algorithm.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}

/// Format label for a delimiter.
fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Decode bytes as UTF-8, dropping a leading byte-order mark.
fn decode(bytes: &[u8]) -> Result<&str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|e| {
        TabCleanError::Encoding(format!(
            "input is not valid UTF-8 (first bad byte at offset {})",
            e.valid_up_to()
        ))
    })
}

fn cell_value(raw: &str) -> Value {
    if is_null_marker(raw) {
        Value::Null
    } else {
        Value::text(raw)
    }
}

/// Header text for column `index`; blank headers become `Unnamed: <index>`.
pub(crate) fn header_name(index: usize, raw: &str) -> String {
    if raw.trim().is_empty() {
        format!("Unnamed: {}", index)
    } else {
        raw.to_string()
    }
}

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
pub(crate) fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        let mut candidate = header.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", header, n);
            n += 1;
        }
        seen.push(candidate);
    }
    seen
}

/// Turn text columns whose every value parses as a number into numeric
/// columns, the way a reader with type inference would.
fn infer_numeric_columns(table: Table) -> Table {
    let columns = table
        .into_columns()
        .into_iter()
        .map(|col| {
            if col.kind() != ColumnType::Text {
                return col;
            }
            let parsed: Option<Vec<Value>> = col
                .values()
                .iter()
                .map(|v| match v {
                    Value::Null => Some(Value::Null),
                    Value::Text(s) => parse_number(s).map(Value::Number),
                    other => Some(other.clone()),
                })
                .collect();
            match parsed {
                Some(values) => col.with_values(values),
                None => col,
            }
        })
        .collect::<Vec<Column>>();
    Table::from_columns_unchecked(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_counts() {
        assert_eq!(detect_delimiter("a,b;c,d,e"), b',');
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), b';');
        assert_eq!(detect_delimiter("a|b|c"), b'|');
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), b'\t');
    }

    #[test]
    fn test_detect_delimiter_default_and_ties() {
        assert_eq!(detect_delimiter("no delimiters here"), b',');
        assert_eq!(detect_delimiter(""), b',');
        // Tie: the earlier candidate wins.
        assert_eq!(detect_delimiter("a;b,c"), b',');
        assert_eq!(detect_delimiter("a|b;c"), b';');
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let table = parser
            .parse_delimited("name,age,city\nAlice,30,NYC\nBob,25,LA", b',')
            .unwrap();

        assert_eq!(table.column_names(), vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some(&Value::text("Alice")));
        assert_eq!(table.get(1, 1), Some(&Value::Number(25.0)));
        assert_eq!(table.columns()[1].kind(), ColumnType::Number);
    }

    #[test]
    fn test_thousands_column_stays_text() {
        let table = Parser::new()
            .parse_str("amount\n\"1,200\"\n450")
            .unwrap();
        assert_eq!(table.columns()[0].kind(), ColumnType::Text);
    }

    #[test]
    fn test_null_markers() {
        assert!(is_null_marker(""));
        assert!(is_null_marker("NA"));
        assert!(is_null_marker("N/A"));
        assert!(is_null_marker("null"));
        assert!(is_null_marker("NaN"));
        assert!(!is_null_marker("value"));
        assert!(!is_null_marker("0"));
        assert!(!is_null_marker(" "));
    }

    #[test]
    fn test_short_rows_padded() {
        let table = Parser::new().parse_delimited("a,b,c\n1,2\n", b',').unwrap();
        assert_eq!(table.get(0, 2), Some(&Value::Null));
    }

    #[test]
    fn test_long_rows_rejected() {
        let err = Parser::new()
            .parse_delimited("a,b\n1,2,3\n", b',')
            .unwrap_err();
        assert!(matches!(err, TabCleanError::Parse { row: 2, column: 3, .. }));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = Parser::new().parse_str("").unwrap_err();
        assert!(matches!(err, TabCleanError::EmptyData(_)));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = Parser::new().parse_bytes(b"a,b\n\xff\xfe,1").unwrap_err();
        assert!(matches!(err, TabCleanError::Encoding(_)));
    }

    #[test]
    fn test_bom_stripped() {
        let table = Parser::new().parse_bytes(b"\xEF\xBB\xBFid,name\n1,x").unwrap();
        assert_eq!(table.column_names(), vec!["id", "name"]);
    }

    #[test]
    fn test_header_only() {
        let table = Parser::new().parse_str("a,b\n").unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_duplicate_headers_renamed() {
        let table = Parser::new().parse_str("a,a,b,a\n1,2,3,4").unwrap();
        assert_eq!(table.column_names(), vec!["a", "a.1", "b", "a.2"]);
    }

    #[test]
    fn test_blank_headers_named_by_position() {
        let table = Parser::new().parse_str(",\n1,2").unwrap();
        assert_eq!(table.column_names(), vec!["Unnamed: 0", "Unnamed: 1"]);

        let table = Parser::new().parse_str("a, ,b\n1,2,3").unwrap();
        assert_eq!(table.column_names(), vec!["a", "Unnamed: 1", "b"]);
    }

    #[test]
    fn test_no_header() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let table = parser.parse_str("x,1\ny,2").unwrap();
        assert_eq!(table.column_names(), vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_type_inference_can_be_disabled() {
        let parser = Parser::with_config(ParserConfig {
            infer_types: false,
            ..ParserConfig::default()
        });
        let table = parser.parse_str("n\n1\n2").unwrap();
        assert_eq!(table.columns()[0].kind(), ColumnType::Text);
    }

    #[test]
    fn test_content_hash_prefix() {
        let hash = content_hash(b"abc");
        assert!(hash.starts_with("sha256:"));
        assert_eq!(hash.len(), "sha256:".len() + 64);
    }
}
