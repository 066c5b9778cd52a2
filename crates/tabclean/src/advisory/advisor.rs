//! Markdown suggestions combining heuristics with an optional provider.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::llm::{DatasetSummary, LlmProvider};
use crate::table::Table;

use super::heuristics::heuristic_suggestions;

/// Produces cleaning advice for a table.
///
/// Without a provider the output is purely heuristic. With one, the
/// provider's reply is appended; a failing provider never fails the call.
#[derive(Clone, Default)]
pub struct Advisor {
    llm_provider: Option<Arc<dyn LlmProvider>>,
}

impl Advisor {
    /// Heuristic-only advisor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advisor that also consults an LLM provider.
    pub fn with_llm(provider: impl LlmProvider + 'static) -> Self {
        Self::with_shared_llm(Arc::new(provider))
    }

    /// Advisor sharing an already-boxed provider.
    pub fn with_shared_llm(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            llm_provider: Some(provider),
        }
    }

    /// Whether a provider is attached.
    pub fn has_llm(&self) -> bool {
        self.llm_provider.is_some()
    }

    /// Markdown advice for the original table, given its transformed version.
    pub fn summarize(&self, original: &Table, transformed: &Table) -> String {
        let bullets: Vec<String> = heuristic_suggestions(original)
            .into_iter()
            .map(|issue| format!("- {}", issue))
            .collect();
        let heuristic = format!("### Heuristic suggestions\n{}", bullets.join("\n"));

        let Some(provider) = &self.llm_provider else {
            return heuristic;
        };

        let summary = DatasetSummary::from_tables(original, transformed);
        debug!(provider = provider.name(), "requesting llm suggestions");
        match provider.suggest_cleaning(&summary) {
            Ok(reply) => format!("{}\n\n### LLM suggestions\n{}", heuristic, reply.trim()),
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "llm suggestions unavailable");
                heuristic
            }
        }
    }
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor")
            .field("llm_provider", &self.llm_provider.as_ref().map(|p| p.name()))
            .finish()
    }
}

/// Heuristic-only advice; shorthand for `Advisor::new().summarize(..)`.
pub fn summarize(original: &Table, transformed: &Table) -> String {
    Advisor::new().summarize(original, transformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockProvider;
    use crate::table::{Column, Value};

    fn messy() -> Table {
        Table::new(vec![Column::new(
            "City",
            vec![Value::text(" Oslo"), Value::text(" Oslo"), Value::Null],
        )])
        .unwrap()
    }

    #[test]
    fn test_heuristic_only() {
        let text = summarize(&messy(), &messy());
        assert!(text.starts_with("### Heuristic suggestions\n- There are duplicate rows"));
        assert!(text.contains("- Column 'City' may contain leading/trailing spaces."));
        assert!(!text.contains("### LLM suggestions"));
    }

    #[test]
    fn test_generic_when_clean() {
        let table = Table::new(vec![Column::from_strs("a", &["x"])]).unwrap();
        assert_eq!(
            summarize(&table, &table),
            "### Heuristic suggestions\n- No major issues found. Consider standardizing column names and ensuring correct dtypes."
        );
    }

    #[test]
    fn test_llm_reply_appended() {
        let advisor = Advisor::with_llm(MockProvider::new());
        assert!(advisor.has_llm());
        let text = advisor.summarize(&messy(), &messy());
        let (heuristic, llm) = text.split_once("\n\n### LLM suggestions\n").unwrap();
        assert!(heuristic.starts_with("### Heuristic suggestions"));
        assert!(llm.contains("Column 'City' has 1 missing values"));
    }

    #[test]
    fn test_llm_failure_degrades() {
        let advisor = Advisor::with_llm(MockProvider::failing());
        let text = advisor.summarize(&messy(), &messy());
        assert_eq!(text, summarize(&messy(), &messy()));
    }
}
