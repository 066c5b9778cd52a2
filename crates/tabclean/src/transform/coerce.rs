//! Best-effort numeric and date coercion.
//!
//! Nothing here fails: a value that cannot be converted becomes
//! [`Value::Null`], and whole-column helpers decide whether a column is
//! worth converting at all.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::table::{Column, ColumnType, Value};

/// How many non-null values are sampled when sniffing a date column.
pub const DATE_SAMPLE_SIZE: usize = 20;

/// How many sampled values must parse before a column is treated as dates.
pub const DATE_MIN_MATCHES: usize = 3;

/// Date-time layouts tried in order by [`parse_datetime`].
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m-%d-%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

/// Date-only layouts tried in order by [`parse_datetime`]. Month-first wins
/// over day-first for ambiguous slash dates.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
];

/// Parse a number exactly as written. Rejects `nan` and infinities.
pub fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a number after removing thousands separators and surrounding
/// whitespace, so `" 1,200 "` reads as `1200`.
pub fn parse_number_lenient(text: &str) -> Option<f64> {
    let stripped = text.replace(',', "");
    parse_number(stripped.trim())
}

/// Parse a date or date-time in any of the common layouts.
///
/// Date-only values become midnight timestamps. Zoned values keep their
/// wall-clock time.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}

/// Parse with a caller-supplied strftime layout, as a date-time first and
/// then as a plain date. A malformed layout simply matches nothing.
pub fn parse_datetime_with_format(text: &str, format: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}

/// Convert one cell to a number, or null.
fn to_number(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Number(n) => Value::Number(*n),
        other => parse_number_lenient(&other.render()).map_or(Value::Null, Value::Number),
    }
}

/// Convert one cell to a timestamp, or null.
fn to_timestamp(value: &Value, format: Option<&str>) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Timestamp(ts) => Value::Timestamp(*ts),
        other => {
            let text = other.render();
            let parsed = match format {
                Some(fmt) => parse_datetime_with_format(&text, fmt),
                None => parse_datetime(&text),
            };
            parsed.map_or(Value::Null, Value::Timestamp)
        }
    }
}

/// Force a column to numeric. Every cell that does not convert becomes
/// null, even when that leaves nothing behind.
pub fn coerce_numeric(column: Column) -> Column {
    let values = column.values().iter().map(to_number).collect();
    column.with_values(values)
}

/// Convert a column to numeric when at least one value converts.
///
/// Numeric columns pass through. A column where no value converts is
/// returned exactly as it was; otherwise failed cells become null.
pub fn fix_numeric(column: Column) -> Column {
    if column.kind() == ColumnType::Number {
        return column;
    }

    let converted: Vec<Value> = column.values().iter().map(to_number).collect();
    if converted.iter().all(Value::is_null) {
        return column;
    }
    column.with_values(converted)
}

/// Force a column to timestamps; failures become null.
pub fn coerce_datetime(column: Column, format: Option<&str>) -> Column {
    let values = column
        .values()
        .iter()
        .map(|v| to_timestamp(v, format))
        .collect();
    column.with_values(values)
}

/// Whether enough of a column's leading values read as dates.
///
/// Samples the first [`DATE_SAMPLE_SIZE`] non-null values and requires
/// [`DATE_MIN_MATCHES`] of them to parse.
pub fn looks_like_dates(column: &Column) -> bool {
    column
        .non_null()
        .take(DATE_SAMPLE_SIZE)
        .filter(|v| parse_datetime(&v.render()).is_some())
        .take(DATE_MIN_MATCHES)
        .count()
        >= DATE_MIN_MATCHES
}
