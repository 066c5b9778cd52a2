//! LLM provider trait and types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::Table;

/// Compact description of a dataset sent to a provider.
///
/// Only column names, counts and type tags are included, never cell values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Column names before cleaning.
    pub original_columns: Vec<String>,

    /// Column names after cleaning.
    pub cleaned_columns: Vec<String>,

    /// Missing cells per original column.
    pub null_counts: IndexMap<String, usize>,

    /// Type tag per original column.
    pub types_guess: IndexMap<String, String>,

    /// Rows in the original that repeat an earlier row.
    pub duplicates_in_original: usize,
}

impl DatasetSummary {
    /// Summarize an original table and its cleaned counterpart.
    pub fn from_tables(original: &Table, cleaned: &Table) -> Self {
        let names = |t: &Table| -> Vec<String> {
            t.column_names().into_iter().map(str::to_string).collect()
        };

        Self {
            original_columns: names(original),
            cleaned_columns: names(cleaned),
            null_counts: original
                .columns()
                .iter()
                .map(|c| (c.name().to_string(), c.null_count()))
                .collect(),
            types_guess: original
                .columns()
                .iter()
                .map(|c| (c.name().to_string(), c.kind().as_str().to_string()))
                .collect(),
            duplicates_in_original: original.duplicate_row_count(),
        }
    }

    /// Serialize to compact JSON for a prompt.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Configuration for LLM providers.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0).
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1024,
            temperature: 0.2,
        }
    }
}

impl LlmConfig {
    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Trait for LLM providers.
///
/// Implementations must be thread-safe (Send + Sync) so an advisor can be
/// shared behind an `Arc`.
pub trait LlmProvider: Send + Sync {
    /// Produce markdown bullet suggestions for cleaning the summarized dataset.
    fn suggest_cleaning(&self, summary: &DatasetSummary) -> Result<String>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}
