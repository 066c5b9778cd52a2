//! TabClean: cleaning pipeline for messy tabular files.
//!
//! TabClean loads a delimited text file or spreadsheet, runs a configurable
//! sequence of cleaning steps, applies plain-English edit instructions from a
//! small fixed grammar, and writes the result as CSV or XLSX.
//!
//! # Core Principles
//!
//! - **Non-destructive**: every step returns a new table
//! - **Forgiving**: values that cannot be converted become nulls, never errors
//! - **Safe instructions**: edit text is matched against fixed patterns only
//!
//! # Example
//!
//! ```no_run
//! use tabclean::TabClean;
//!
//! let tabclean = TabClean::new();
//! let result = tabclean
//!     .process("customers.csv", Some("drop columns: Notes"))
//!     .unwrap();
//!
//! println!("Rows: {}", result.cleaned.row_count());
//! for change in &result.changes {
//!     println!("{}", change);
//! }
//! ```

pub mod advisory;
pub mod error;
pub mod export;
pub mod input;
pub mod instruction;
pub mod llm;
pub mod table;
pub mod transform;

mod tabclean;

pub use crate::tabclean::{ProcessResult, TabClean, TabCleanConfig};
pub use advisory::{Advisor, heuristic_suggestions, quality_report, summarize};
pub use error::{Result, TabCleanError};
pub use export::{ExportFormat, to_csv_string, to_xlsx_bytes, write_csv, write_xlsx};
pub use input::{Parser, ParserConfig, SourceMetadata, detect_delimiter};
pub use instruction::{Command, apply_instructions};
pub use llm::{DatasetSummary, LlmConfig, LlmProvider, MockProvider, OpenAIProvider};
pub use table::{Column, ColumnType, Table, TableError, Value};
pub use transform::{CleanConfig, Cleaner, clean, standardize_column_name};
