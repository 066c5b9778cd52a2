//! Writing tables as CSV or XLSX.
//!
//! CSV output is comma separated with a header row and no index column.
//! Missing cells become empty fields. XLSX output holds a single sheet named
//! [`SHEET_NAME`] with numbers stored as numeric cells.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::error::{Result, TabCleanError};
use crate::table::{Table, Value};

/// Worksheet name used for XLSX exports.
pub const SHEET_NAME: &str = "Cleaned Data";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = TabCleanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(TabCleanError::UnsupportedFormat(format!(
                "Cannot export as '{}'; expected csv or xlsx",
                other
            ))),
        }
    }
}

/// Render a table as CSV text.
pub fn to_csv_string(table: &Table) -> Result<String> {
    let bytes = write_records(table, Vec::new())?;
    String::from_utf8(bytes).map_err(|e| TabCleanError::Export(e.to_string()))
}

/// Write a table to a CSV file.
pub fn write_csv(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|e| TabCleanError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_records(table, file)?;
    info!(path = %path.display(), rows = table.row_count(), "wrote csv");
    Ok(())
}

fn write_records<W: Write>(table: &Table, sink: W) -> Result<W> {
    let mut writer = csv::Writer::from_writer(sink);
    // A table with no columns has no header row to write
    if table.column_count() == 0 {
        return writer
            .into_inner()
            .map_err(|e| TabCleanError::Export(format!("Failed to flush CSV: {}", e)));
    }
    writer.write_record(table.column_names())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|v| v.render()))?;
    }
    writer
        .into_inner()
        .map_err(|e| TabCleanError::Export(format!("Failed to flush CSV: {}", e)))
}

/// Render a table as an XLSX workbook in memory.
pub fn to_xlsx_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(table)?;
    workbook.save_to_buffer().map_err(xlsx_error)
}

/// Write a table to an XLSX file.
pub fn write_xlsx(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_xlsx_bytes(table)?;
    std::fs::write(path, bytes).map_err(|e| TabCleanError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), rows = table.row_count(), "wrote xlsx");
    Ok(())
}

/// Write a table in the given format.
pub fn write_table(table: &Table, path: impl AsRef<Path>, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(table, path),
        ExportFormat::Xlsx => write_xlsx(table, path),
    }
}

fn build_workbook(table: &Table) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).map_err(xlsx_error)?;

    for (c, name) in table.column_names().into_iter().enumerate() {
        sheet
            .write_string_with_format(0, column_index(c)?, name, &header)
            .map_err(xlsx_error)?;
    }

    for (r, row) in table.rows().enumerate() {
        let xlsx_row = u32::try_from(r + 1)
            .map_err(|_| TabCleanError::Export("Too many rows for XLSX".to_string()))?;
        for (c, value) in row.into_iter().enumerate() {
            write_cell(sheet, xlsx_row, column_index(c)?, value)?;
        }
    }
    Ok(workbook)
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
    match value {
        Value::Null => return Ok(()),
        Value::Number(n) => sheet.write_number(row, col, *n),
        other => sheet.write_string(row, col, other.render()),
    }
    .map_err(xlsx_error)?;
    Ok(())
}

fn column_index(c: usize) -> Result<u16> {
    u16::try_from(c).map_err(|_| TabCleanError::Export("Too many columns for XLSX".to_string()))
}

fn xlsx_error(e: XlsxError) -> TabCleanError {
    TabCleanError::Export(e.to_string())
}
