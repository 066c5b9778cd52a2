//! CLI command implementations.

pub mod apply;
pub mod clean;
pub mod detect;
pub mod suggest;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use tabclean::{
    ExportFormat, LlmConfig, LlmProvider, MockProvider, OpenAIProvider, SourceMetadata, Table,
};

use crate::cli::LlmProviderChoice;

/// Fail early with a readable message when the input is missing.
pub fn ensure_exists(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}

/// Pick the export format from the flag, then the output extension.
pub fn resolve_format(format: Option<ExportFormat>, output: Option<&Path>) -> ExportFormat {
    format
        .or_else(|| output.and_then(ExportFormat::from_path))
        .unwrap_or_default()
}

/// Default output path: `<stem>_cleaned.<ext>` next to the input.
pub fn default_output(source: &SourceMetadata, format: ExportFormat) -> PathBuf {
    source
        .path
        .with_file_name(format!("{}_cleaned.{}", source.stem(), format.extension()))
}

/// Build the requested LLM provider, if any.
///
/// A provider that cannot be created is reported and skipped so that
/// heuristic suggestions still print.
pub fn build_provider(
    choice: &LlmProviderChoice,
    model: Option<String>,
) -> Option<Arc<dyn LlmProvider>> {
    let mut config = LlmConfig::default();
    if let Some(m) = model {
        config = config.with_model(m);
    }

    match choice {
        LlmProviderChoice::None => None,
        LlmProviderChoice::Mock => Some(Arc::new(MockProvider::with_config(config))),
        LlmProviderChoice::OpenAI => match OpenAIProvider::from_env_with_config(config) {
            Ok(provider) => Some(Arc::new(provider)),
            Err(e) => {
                eprintln!(
                    "{} {} (continuing with heuristic suggestions)",
                    "Warning:".yellow().bold(),
                    e
                );
                None
            }
        },
    }
}

/// Print the column layout of a table.
pub fn print_schema(table: &Table) {
    println!("{}", "Columns:".yellow().bold());
    for column in table.columns() {
        println!(
            "  {:24} {:10} {} nulls",
            column.name(),
            column.kind().to_string(),
            column.null_count()
        );
    }
}

/// Print a change log, one entry per line.
pub fn print_changes(changes: &[String]) {
    if changes.is_empty() {
        println!("{}", "No instruction edits applied.".dimmed());
        return;
    }
    println!("{}", "Changes:".yellow().bold());
    for change in changes {
        println!("  {} {}", "•".cyan(), change);
    }
}
