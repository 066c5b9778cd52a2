//! Apply command - apply an instruction without cleaning and export.

use std::path::PathBuf;

use colored::Colorize;
use tabclean::{ExportFormat, ParserConfig, TabClean, TabCleanConfig, export};

use super::{default_output, ensure_exists, print_changes, print_schema, resolve_format};

pub fn run(
    file: PathBuf,
    instruction: String,
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
    delimiter: Option<u8>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let tabclean = TabClean::with_config(TabCleanConfig {
        parser: ParserConfig {
            delimiter,
            ..Default::default()
        },
        ..Default::default()
    });

    println!(
        "{} {}",
        "Applying".cyan().bold(),
        instruction.white()
    );

    let (table, source) = tabclean.load(&file)?;
    let (edited, changes) = tabclean.apply_instructions(&table, &instruction);

    print_changes(&changes);
    println!(
        "Result: {} rows × {} columns (was {} × {})",
        edited.row_count().to_string().green().bold(),
        edited.column_count().to_string().green().bold(),
        source.row_count,
        source.column_count
    );

    if verbose {
        println!();
        print_schema(&edited);
    }

    let format = resolve_format(format, output.as_deref());
    let output_path = output.unwrap_or_else(|| default_output(&source, format));
    export::write_table(&edited, &output_path, format)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}
