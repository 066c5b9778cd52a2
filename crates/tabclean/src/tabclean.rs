//! Main TabClean struct and public API.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::advisory::{Advisor, quality_report};
use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::instruction;
use crate::llm::LlmProvider;
use crate::table::Table;
use crate::transform::{CleanConfig, Cleaner};

/// Configuration for a TabClean session.
#[derive(Debug, Clone, Default)]
pub struct TabCleanConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Which cleaning steps run.
    pub clean: CleanConfig,
}

/// Result of loading, cleaning and optionally editing a file.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// The table as loaded.
    pub original: Table,
    /// The table after cleaning and any instruction edits.
    pub cleaned: Table,
    /// Edits applied by the instruction, in order.
    pub changes: Vec<String>,
}

impl ProcessResult {
    /// Rows removed between load and the final table.
    pub fn rows_removed(&self) -> usize {
        self.original.row_count().saturating_sub(self.cleaned.row_count())
    }

    /// Columns removed between load and the final table.
    pub fn columns_removed(&self) -> usize {
        self.original
            .column_count()
            .saturating_sub(self.cleaned.column_count())
    }
}

/// The main cleaning engine.
///
/// Bundles a parser, a cleaner and an advisor. Every operation returns new
/// tables; inputs are never modified.
pub struct TabClean {
    config: TabCleanConfig,
    parser: Parser,
    cleaner: Cleaner,
    llm_provider: Option<Arc<dyn LlmProvider>>,
}

impl TabClean {
    /// Create a new instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(TabCleanConfig::default())
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: TabCleanConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let cleaner = Cleaner::with_config(config.clean);

        Self {
            config,
            parser,
            cleaner,
            llm_provider: None,
        }
    }

    /// Add an LLM provider whose suggestions are appended to the advice.
    pub fn with_llm(mut self, provider: impl LlmProvider + 'static) -> Self {
        self.llm_provider = Some(Arc::new(provider));
        self
    }

    /// Add an already-shared LLM provider.
    pub fn with_shared_llm(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.llm_provider = Some(provider);
        self
    }

    /// The configuration in use.
    pub fn config(&self) -> &TabCleanConfig {
        &self.config
    }

    /// Load a delimited or spreadsheet file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Run the configured cleaning steps.
    pub fn clean(&self, table: &Table) -> Table {
        self.cleaner.clean(table)
    }

    /// Apply a natural-language instruction, returning the edited table and
    /// change log.
    pub fn apply_instructions(&self, table: &Table, instruction: &str) -> (Table, Vec<String>) {
        instruction::apply_instructions(table, instruction)
    }

    /// Markdown cleaning advice for the original table.
    pub fn suggest(&self, original: &Table, transformed: &Table) -> String {
        self.advisor().summarize(original, transformed)
    }

    /// Markdown before/after quality report.
    pub fn report(&self, original: &Table, cleaned: &Table) -> String {
        quality_report(original, cleaned)
    }

    /// Load, clean and optionally apply an instruction to a file.
    pub fn process(
        &self,
        path: impl AsRef<Path>,
        instruction: Option<&str>,
    ) -> Result<ProcessResult> {
        let (original, source) = self.load(path)?;
        let cleaned = self.clean(&original);

        let (cleaned, changes) = match instruction {
            Some(text) => self.apply_instructions(&cleaned, text),
            None => (cleaned, Vec::new()),
        };

        info!(
            file = %source.file,
            rows_before = original.row_count(),
            rows_after = cleaned.row_count(),
            changes = changes.len(),
            "processed file"
        );

        Ok(ProcessResult {
            source,
            original,
            cleaned,
            changes,
        })
    }

    fn advisor(&self) -> Advisor {
        match &self.llm_provider {
            Some(provider) => Advisor::with_shared_llm(Arc::clone(provider)),
            None => Advisor::new(),
        }
    }
}

impl Default for TabClean {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_process_cleans_and_applies() {
        let file = csv_file("Full Name,Amount\n Ann ,\"1,200\"\n Ann ,\"1,200\"\nBob,450\n");
        let result = TabClean::new()
            .process(file.path(), Some("drop rows where full_name = Bob"))
            .unwrap();

        assert_eq!(result.original.row_count(), 3);
        assert_eq!(result.cleaned.column_names(), vec!["full_name", "amount"]);
        assert_eq!(result.cleaned.row_count(), 1);
        assert_eq!(result.rows_removed(), 2);
        assert_eq!(result.columns_removed(), 0);
        assert_eq!(result.changes, vec!["Dropped 1 rows where full_name == Bob"]);
    }

    #[test]
    fn test_process_without_instruction() {
        let file = csv_file("a;b\n1;2\n");
        let result = TabClean::new().process(file.path(), None).unwrap();
        assert!(result.changes.is_empty());
        assert_eq!(result.source.format, "csv-semicolon");
    }

    #[test]
    fn test_suggest_with_llm() {
        let file = csv_file("a,b\n1,\n1,\n");
        let tabclean = TabClean::new().with_llm(MockProvider::new());
        let (original, _) = tabclean.load(file.path()).unwrap();
        let cleaned = tabclean.clean(&original);
        let advice = tabclean.suggest(&original, &cleaned);
        assert!(advice.contains("### Heuristic suggestions"));
        assert!(advice.contains("### LLM suggestions"));
    }

    #[test]
    fn test_custom_clean_config() {
        let config = TabCleanConfig {
            clean: CleanConfig::none(),
            ..Default::default()
        };
        let tabclean = TabClean::with_config(config);
        let table = Table::new(vec![crate::table::Column::from_strs("A B", &[" x "])]).unwrap();
        assert_eq!(tabclean.clean(&table), table);
    }
}
