//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tabclean::ExportFormat;

/// TabClean: clean messy CSV and spreadsheet files
#[derive(Parser)]
#[command(name = "tabclean")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a file, optionally apply an instruction, and export it
    Clean(CleanArgs),

    /// Apply an instruction without running the cleaning steps
    Apply {
        /// Path to the data file (CSV/TSV/XLSX)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Instruction, e.g. "drop columns: Notes; convert Amount to numeric"
        #[arg(short, long)]
        instruction: String,

        /// Output path (default: <stem>_cleaned.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (csv or xlsx)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Delimiter override (",", ";", "|" or "tab")
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,
    },

    /// Print a quality report and cleaning suggestions
    Suggest {
        /// Path to the data file (CSV/TSV/XLSX)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// LLM provider for additional suggestions
        #[arg(long, default_value = "none")]
        llm: LlmProviderChoice,

        /// Model to use (provider-specific, e.g., "gpt-4o-mini")
        #[arg(long)]
        model: Option<String>,
    },

    /// Print the detected delimiter of a text file
    Detect {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Options for the `clean` command.
#[derive(Args)]
pub struct CleanArgs {
    /// Path to the data file (CSV/TSV/XLSX)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output path (default: <stem>_cleaned.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (csv or xlsx)
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// JSON file with cleaning options; flags below override it
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Keep surrounding whitespace in text cells
    #[arg(long)]
    pub no_trim: bool,

    /// Keep column names as they are
    #[arg(long)]
    pub no_standardize: bool,

    /// Keep rows where every cell is empty
    #[arg(long)]
    pub keep_empty_rows: bool,

    /// Keep columns where every cell is empty
    #[arg(long)]
    pub keep_empty_cols: bool,

    /// Keep duplicate rows
    #[arg(long)]
    pub keep_duplicates: bool,

    /// Leave text columns that look numeric unconverted
    #[arg(long)]
    pub no_fix_numbers: bool,

    /// Convert columns that look like dates
    #[arg(long)]
    pub parse_dates: bool,

    /// Delimiter override (",", ";", "|" or "tab")
    #[arg(short, long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Instruction applied after cleaning
    #[arg(short, long)]
    pub instruction: Option<String>,

    /// Print cleaning suggestions
    #[arg(long)]
    pub suggest: bool,

    /// LLM provider for additional suggestions
    #[arg(long, default_value = "none")]
    pub llm: LlmProviderChoice,

    /// Model to use (provider-specific, e.g., "gpt-4o-mini")
    #[arg(long)]
    pub model: Option<String>,
}

/// LLM provider choice for suggestions
#[derive(Clone, Debug, Default)]
pub enum LlmProviderChoice {
    /// No LLM - heuristic suggestions only
    #[default]
    None,
    /// OpenAI GPT API (requires OPENAI_API_KEY)
    OpenAI,
    /// Mock provider for testing
    Mock,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(LlmProviderChoice::None),
            "openai" | "gpt" => Ok(LlmProviderChoice::OpenAI),
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            _ => Err(format!(
                "Unknown provider: {}. Use: none, openai, or mock.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::None => write!(f, "none"),
            LlmProviderChoice::OpenAI => write!(f, "openai"),
            LlmProviderChoice::Mock => write!(f, "mock"),
        }
    }
}

/// Parse a delimiter argument into a single byte.
pub fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        "comma" => Ok(b','),
        "semicolon" => Ok(b';'),
        "pipe" => Ok(b'|'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!(
            "Invalid delimiter: {:?}. Use a single character or tab.",
            s
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("pipe"), Ok(b'|'));
        assert!(parse_delimiter("::").is_err());
    }

    #[test]
    fn test_clean_flags() {
        let cli = Cli::try_parse_from([
            "tabclean",
            "clean",
            "data.csv",
            "--no-trim",
            "--parse-dates",
            "-f",
            "xlsx",
            "-i",
            "drop columns: Notes",
            "--llm",
            "mock",
        ])
        .unwrap();
        match cli.command {
            Commands::Clean(args) => {
                assert!(args.no_trim);
                assert!(args.parse_dates);
                assert!(!args.keep_duplicates);
                assert_eq!(args.format, Some(ExportFormat::Xlsx));
                assert_eq!(args.instruction.as_deref(), Some("drop columns: Notes"));
                assert!(matches!(args.llm, LlmProviderChoice::Mock));
            }
            _ => panic!("expected clean command"),
        }
    }

    #[test]
    fn test_apply_requires_instruction() {
        assert!(Cli::try_parse_from(["tabclean", "apply", "data.csv"]).is_err());
    }
}
