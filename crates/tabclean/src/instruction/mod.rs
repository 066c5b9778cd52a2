//! Natural-language table edits from a fixed phrase grammar.
//!
//! Instructions are matched against a closed set of patterns; nothing in
//! the text is ever evaluated.

mod command;
mod interpreter;

pub use command::{Command, parse_instructions};
pub use interpreter::{apply_commands, apply_instructions};
