//! TabClean CLI - clean messy tabular files.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Clean(args) => commands::clean::run(args, cli.verbose),

        Commands::Apply {
            file,
            instruction,
            output,
            format,
            delimiter,
        } => commands::apply::run(file, instruction, output, format, delimiter, cli.verbose),

        Commands::Suggest { file, llm, model } => {
            commands::suggest::run(file, llm, model, cli.verbose)
        }

        Commands::Detect { file } => commands::detect::run(file, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` or by the verbosity flag.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
