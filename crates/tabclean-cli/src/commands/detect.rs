//! Detect command - print the delimiter a file would be parsed with.

use std::path::PathBuf;

use colored::Colorize;
use tabclean::detect_delimiter;

use super::ensure_exists;

pub fn run(file: PathBuf, _verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let bytes = std::fs::read(&file)?;
    let text = String::from_utf8_lossy(&bytes);
    let delimiter = detect_delimiter(&text);

    println!(
        "{} {} ({})",
        "Detected delimiter:".green().bold(),
        format!("{:?}", delimiter as char).white().bold(),
        delimiter_name(delimiter)
    );

    Ok(())
}

fn delimiter_name(delimiter: u8) -> &'static str {
    match delimiter {
        b',' => "comma",
        b';' => "semicolon",
        b'|' => "pipe",
        b'\t' => "tab",
        _ => "other",
    }
}
