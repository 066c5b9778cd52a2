//! Suggest command - print a quality report and cleaning suggestions.

use std::path::PathBuf;

use colored::Colorize;
use tabclean::TabClean;

use crate::cli::LlmProviderChoice;

use super::{build_provider, ensure_exists, print_schema};

pub fn run(
    file: PathBuf,
    llm: LlmProviderChoice,
    model: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let mut tabclean = TabClean::new();
    if let Some(provider) = build_provider(&llm, model) {
        tabclean = tabclean.with_shared_llm(provider);
    }

    println!(
        "{} {}",
        "Inspecting".cyan().bold(),
        file.display().to_string().white()
    );

    let (original, _) = tabclean.load(&file)?;
    if verbose {
        println!();
        print_schema(&original);
    }

    let cleaned = tabclean.clean(&original);

    println!();
    println!("{}", "Data quality report".yellow().bold());
    println!("{}", tabclean.report(&original, &cleaned));
    println!("{}", tabclean.suggest(&original, &cleaned));

    Ok(())
}
