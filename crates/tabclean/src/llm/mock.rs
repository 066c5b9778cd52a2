//! Mock LLM provider for testing.

use crate::error::{Result, TabCleanError};

use super::provider::{DatasetSummary, LlmConfig, LlmProvider};

/// Mock LLM provider that returns predictable responses for testing.
pub struct MockProvider {
    config: LlmConfig,
    fail: bool,
}

impl MockProvider {
    /// Create a new mock provider.
    pub fn new() -> Self {
        Self {
            config: LlmConfig::default(),
            fail: false,
        }
    }

    /// Create with custom configuration.
    pub fn with_config(config: LlmConfig) -> Self {
        Self {
            config,
            fail: false,
        }
    }

    /// A provider whose every call fails, for exercising degradation paths.
    pub fn failing() -> Self {
        Self {
            config: LlmConfig::default(),
            fail: true,
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn suggest_cleaning(&self, summary: &DatasetSummary) -> Result<String> {
        if self.fail {
            return Err(TabCleanError::Llm("mock provider failure".to_string()));
        }

        let mut bullets = vec![format!(
            "- Review the {} original columns for consistent naming.",
            summary.original_columns.len()
        )];

        for (column, nulls) in &summary.null_counts {
            if *nulls > 0 {
                bullets.push(format!(
                    "- Column '{}' has {} missing values; fill or drop them.",
                    column, nulls
                ));
            }
        }

        if summary.duplicates_in_original > 0 {
            bullets.push(format!(
                "- Remove {} duplicate rows.",
                summary.duplicates_in_original
            ));
        }

        Ok(bullets.join("\n"))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}
