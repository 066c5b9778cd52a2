//! Spreadsheet input via calamine.

use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};
use tracing::debug;

use crate::error::{Result, TabCleanError};
use crate::table::{Table, Value};

use super::parser::{dedupe_headers, header_name, is_null_marker};

/// Read the first worksheet of a workbook. The first row is the header.
pub fn read_first_sheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        TabCleanError::Spreadsheet(format!("Failed to open '{}': {}", path.display(), e))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TabCleanError::EmptyData("No worksheet found".to_string()))?
        .map_err(|e| TabCleanError::Spreadsheet(format!("Failed to read worksheet: {}", e)))?;

    let mut rows = range.rows();
    let header_row = rows
        .next()
        .ok_or_else(|| TabCleanError::EmptyData("Worksheet is empty".to_string()))?;

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| header_name(i, &cell.to_string()))
        .collect();
    let width = headers.len();

    let body: Vec<Vec<Value>> = rows
        .map(|row| {
            let mut values: Vec<Value> = row.iter().map(cell_value).collect();
            values.resize(width, Value::Null);
            values
        })
        .collect();

    debug!(rows = body.len(), columns = width, "read worksheet");
    Ok(Table::from_rows(dedupe_headers(headers), body)?)
}

/// Convert a spreadsheet cell into a table value.
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Int(i) => Value::number(*i as f64),
        Data::Float(f) => Value::number(*f),
        Data::String(s) if is_null_marker(s) => Value::Null,
        Data::String(s) => Value::text(s.as_str()),
        Data::Bool(b) => Value::text(if *b { "true" } else { "false" }),
        Data::DateTime(_) | Data::DateTimeIso(_) => {
            cell.as_datetime().map_or(Value::Null, Value::Timestamp)
        }
        other => Value::text(other.to_string()),
    }
}
