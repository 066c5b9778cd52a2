//! Prompt templates for LLM interactions.

use crate::error::Result;

use super::provider::DatasetSummary;

/// System prompt shared by all providers.
pub fn system_prompt() -> &'static str {
    "You are a data-cleaning expert. Given a summary of a dataset (columns, null counts, \
possible types, duplicates), produce short bullet-point suggestions for cleaning. \
Keep it practical and focused on operations a tabular data tool can perform. \
Return Markdown bullets."
}

/// Build the user prompt for cleaning suggestions.
pub fn cleaning_prompt(summary: &DatasetSummary) -> Result<String> {
    Ok(format!(
        "Dataset summary:\n{}\n\nProvide concise bullet suggestions.",
        summary.to_json()?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Table};

    #[test]
    fn test_cleaning_prompt_embeds_summary() {
        let table = Table::new(vec![Column::from_strs("City", &["Oslo"])]).unwrap();
        let summary = DatasetSummary::from_tables(&table, &table);
        let prompt = cleaning_prompt(&summary).unwrap();
        assert!(prompt.starts_with("Dataset summary:\n{"));
        assert!(prompt.contains("\"City\""));
        assert!(prompt.ends_with("Provide concise bullet suggestions."));
    }

    #[test]
    fn test_system_prompt() {
        assert!(system_prompt().starts_with("You are a data-cleaning expert."));
        assert!(system_prompt().contains("Markdown bullets"));
    }
}
