//! Applies parsed commands to a table and records what changed.

use tracing::debug;

use crate::table::{Column, Table, Value};
use crate::transform::coerce::{coerce_datetime, coerce_numeric};

use super::command::{Command, parse_instructions};

/// Apply every command recognized in `text` to a copy of the table.
///
/// Returns the edited table and one human-readable entry per applied edit.
/// Commands that name columns missing from the table are skipped without
/// an entry. Text that matches no pattern returns the table unchanged.
pub fn apply_instructions(table: &Table, text: &str) -> (Table, Vec<String>) {
    let commands = parse_instructions(text);
    debug!(commands = commands.len(), "parsed instructions");
    apply_commands(table, &commands)
}

/// Apply already-parsed commands in order.
pub fn apply_commands(table: &Table, commands: &[Command]) -> (Table, Vec<String>) {
    let mut out = table.clone();
    let mut changes = Vec::new();

    for command in commands {
        let (next, entry) = command.apply(out);
        out = next;
        match entry {
            Some(entry) => {
                debug!(change = %entry, "applied instruction");
                changes.push(entry);
            }
            None => debug!(?command, "instruction had no effect"),
        }
    }

    (out, changes)
}

impl Command {
    /// Apply this command, returning the new table and its change-log entry.
    pub fn apply(&self, table: Table) -> (Table, Option<String>) {
        match self {
            Command::Rename { mapping } => {
                let mut applied = Vec::new();
                let columns = table
                    .into_columns()
                    .into_iter()
                    .map(|col| match mapping.get(col.name()) {
                        Some(new_name) => {
                            applied.push(format!("'{}' -> '{}'", col.name(), new_name));
                            col.renamed(new_name.as_str())
                        }
                        None => col,
                    })
                    .collect();
                let out = Table::from_columns_unchecked(columns);
                let entry = (!applied.is_empty())
                    .then(|| format!("Renamed columns: {}", applied.join(", ")));
                (out, entry)
            }

            Command::DropColumns { columns } => {
                let mut present: Vec<&str> = Vec::new();
                for name in columns {
                    if table.has_column(name) && !present.contains(&name.as_str()) {
                        present.push(name);
                    }
                }
                if present.is_empty() {
                    return (table, None);
                }
                let entry = format!("Dropped columns: {}", present.join(", "));
                let kept: Vec<Column> = table
                    .into_columns()
                    .into_iter()
                    .filter(|col| !present.contains(&col.name()))
                    .collect();
                (Table::from_columns_unchecked(kept), Some(entry))
            }

            Command::DropRowsWhereNull { column } => {
                let Some(index) = table.column_index(column) else {
                    return (table, None);
                };
                let keep: Vec<bool> = table.columns()[index]
                    .values()
                    .iter()
                    .map(|v| !v.is_null())
                    .collect();
                let dropped = keep.iter().filter(|k| !**k).count();
                let out = table.filter_rows(&keep);
                (
                    out,
                    Some(format!("Dropped {} rows where {} is null", dropped, column)),
                )
            }

            Command::DropRowsWhereEquals { column, value } => {
                let Some(index) = table.column_index(column) else {
                    return (table, None);
                };
                let keep: Vec<bool> = table.columns()[index]
                    .values()
                    .iter()
                    .map(|v| v.is_null() || v.render() != *value)
                    .collect();
                let dropped = keep.iter().filter(|k| !**k).count();
                let out = table.filter_rows(&keep);
                (
                    out,
                    Some(format!(
                        "Dropped {} rows where {} == {}",
                        dropped, column, value
                    )),
                )
            }

            Command::FillNulls { column, value } => {
                let Some(index) = table.column_index(column) else {
                    return (table, None);
                };
                let out = table.map_column(index, |col| {
                    col.map_values(|v| if v.is_null() { value.clone() } else { v })
                });
                (
                    out,
                    Some(format!("Filled nulls in {} with {}", column, fill_label(value))),
                )
            }

            Command::ConvertNumeric { column } => {
                let Some(index) = table.column_index(column) else {
                    return (table, None);
                };
                let out = table.map_column(index, coerce_numeric);
                (out, Some(format!("Converted {} to numeric", column)))
            }

            Command::ParseDate { column, format } => {
                let Some(index) = table.column_index(column) else {
                    return (table, None);
                };
                let out = table.map_column(index, |col| coerce_datetime(col, format.as_deref()));
                let entry = match format {
                    Some(fmt) => format!("Parsed {} as date with format {}", column, fmt),
                    None => format!("Parsed {} as date (auto-detect)", column),
                };
                (out, Some(entry))
            }
        }
    }
}

fn fill_label(value: &Value) -> String {
    match value {
        Value::Number(n) => format!("{:?}", n),
        other => other.render(),
    }
}
