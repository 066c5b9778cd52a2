//! In-memory table representation.

mod column;
mod table;
mod types;

pub use column::Column;
pub use table::{Table, TableError};
pub use types::{ColumnType, Value};
