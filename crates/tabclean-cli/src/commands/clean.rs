//! Clean command - run the cleaning steps, apply an instruction, export.

use colored::Colorize;
use tabclean::{CleanConfig, ParserConfig, TabClean, TabCleanConfig, export};

use crate::cli::CleanArgs;

use super::{
    build_provider, default_output, ensure_exists, print_changes, print_schema, resolve_format,
};

pub fn run(args: CleanArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&args.file)?;

    let clean = clean_config(&args)?;
    let config = TabCleanConfig {
        parser: ParserConfig {
            delimiter: args.delimiter,
            ..Default::default()
        },
        clean,
    };

    let mut tabclean = TabClean::with_config(config);
    if let Some(provider) = build_provider(&args.llm, args.model.clone()) {
        tabclean = tabclean.with_shared_llm(provider);
    }

    println!(
        "{} {}",
        "Cleaning".cyan().bold(),
        args.file.display().to_string().white()
    );

    let result = tabclean.process(&args.file, args.instruction.as_deref())?;

    println!(
        "Loaded {} rows × {} columns ({})",
        result.original.row_count().to_string().white().bold(),
        result.original.column_count().to_string().white().bold(),
        result.source.format
    );
    println!("Steps: {}", clean.enabled_steps().join(", "));

    if args.instruction.is_some() {
        println!();
        print_changes(&result.changes);
    }

    println!();
    println!(
        "Cleaned: {} rows × {} columns (removed {} rows, {} columns)",
        result.cleaned.row_count().to_string().green().bold(),
        result.cleaned.column_count().to_string().green().bold(),
        result.rows_removed().to_string().yellow(),
        result.columns_removed().to_string().yellow()
    );

    if verbose {
        println!();
        print_schema(&result.cleaned);
    }

    if args.suggest {
        println!();
        println!("{}", tabclean.suggest(&result.original, &result.cleaned));
    }

    let format = resolve_format(args.format, args.output.as_deref());
    let output_path = args
        .output
        .unwrap_or_else(|| default_output(&result.source, format));
    export::write_table(&result.cleaned, &output_path, format)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}

/// Start from the config file (or defaults) and apply flag overrides.
fn clean_config(args: &CleanArgs) -> Result<CleanConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => CleanConfig::from_json_file(path)?,
        None => CleanConfig::default(),
    };

    if args.no_trim {
        config.trim = false;
    }
    if args.no_standardize {
        config.standardize_names = false;
    }
    if args.keep_empty_rows {
        config.drop_empty_rows = false;
    }
    if args.keep_empty_cols {
        config.drop_empty_cols = false;
    }
    if args.keep_duplicates {
        config.drop_duplicates = false;
    }
    if args.no_fix_numbers {
        config.fix_numbers = false;
    }
    if args.parse_dates {
        config.parse_dates = true;
    }
    Ok(config)
}
