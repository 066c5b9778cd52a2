//! Cleaning pipeline configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabCleanError};

/// Which cleaning steps run. The order of the steps is fixed by the
/// pipeline and cannot be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Strip leading/trailing whitespace from text cells.
    pub trim: bool,
    /// Rewrite column names as lowercase snake_case.
    pub standardize_names: bool,
    /// Remove rows where every cell is missing.
    pub drop_empty_rows: bool,
    /// Remove columns where every cell is missing.
    pub drop_empty_cols: bool,
    /// Remove exact duplicate rows, keeping the first.
    pub drop_duplicates: bool,
    /// Strip thousands separators and convert numeric-looking columns.
    pub fix_numbers: bool,
    /// Convert columns that look like dates.
    pub parse_dates: bool,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            trim: true,
            standardize_names: true,
            drop_empty_rows: true,
            drop_empty_cols: true,
            drop_duplicates: true,
            fix_numbers: true,
            parse_dates: false,
        }
    }
}

impl CleanConfig {
    /// Every step enabled, including date parsing.
    pub fn all() -> Self {
        Self {
            parse_dates: true,
            ..Self::default()
        }
    }

    /// Every step disabled; cleaning returns the table unchanged.
    pub fn none() -> Self {
        Self {
            trim: false,
            standardize_names: false,
            drop_empty_rows: false,
            drop_empty_cols: false,
            drop_duplicates: false,
            fix_numbers: false,
            parse_dates: false,
        }
    }

    /// Load a configuration from a JSON file. Missing keys keep their
    /// defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| TabCleanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&contents)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TabCleanError::Config(format!("Invalid cleaning config: {}", e)))
    }

    /// Human-readable names of the enabled steps, in pipeline order.
    pub fn enabled_steps(&self) -> Vec<&'static str> {
        [
            (self.trim, "Trimmed spaces"),
            (self.standardize_names, "Standardized column names"),
            (self.drop_empty_rows, "Removed empty rows"),
            (self.drop_empty_cols, "Removed empty columns"),
            (self.drop_duplicates, "Removed duplicate rows"),
            (self.fix_numbers, "Fixed numeric columns"),
            (self.parse_dates, "Parsed dates where possible"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }
}
