//! Table cleaning: the step pipeline and its coercion helpers.

pub mod coerce;
mod config;
mod engine;
mod names;

pub use config::CleanConfig;
pub use engine::{
    Cleaner, clean, drop_duplicate_rows, drop_empty_columns, drop_empty_rows,
    fix_numeric_columns, parse_date_columns, standardize_names, trim_text,
};
pub use names::standardize_column_name;
