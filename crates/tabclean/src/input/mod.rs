//! Input parsing and data source handling.

mod parser;
mod source;
mod spreadsheet;

pub use parser::{Parser, ParserConfig, content_hash, detect_delimiter, is_null_marker};
pub use source::SourceMetadata;
pub use spreadsheet::read_first_sheet;
