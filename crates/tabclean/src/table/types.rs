//! Cell values and the per-column type tag.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single cell.
///
/// Numbers are always finite; constructors in this crate never produce
/// `NaN` or infinities, which keeps equality total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Missing value.
    Null,
    /// Text value.
    Text(String),
    /// Finite floating-point number.
    Number(f64),
    /// Date and time without a zone.
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Build a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Build a number, mapping non-finite input to null.
    pub fn number(n: f64) -> Self {
        if n.is_finite() { Value::Number(n) } else { Value::Null }
    }

    /// Returns true if this cell is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the text if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The timestamp if this is a temporal cell.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Text form of the cell, used for comparisons and export.
    ///
    /// Nulls render as the empty string.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Timestamp(ts) => {
                if ts.time() == NaiveTime::MIN {
                    write!(f, "{}", ts.format("%Y-%m-%d"))
                } else if ts.nanosecond() == 0 {
                    write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S"))
                } else {
                    write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.f"))
                }
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Text(s) => s.hash(state),
            // Adding zero folds -0.0 into 0.0 so equal numbers hash alike.
            Value::Number(n) => (n + 0.0).to_bits().hash(state),
            Value::Timestamp(ts) => ts.hash(state),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::number(n)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(ts: NaiveDateTime) -> Self {
        Value::Timestamp(ts)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Runtime type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Text, or a mix of kinds.
    Text,
    /// Every non-null value is a number.
    Number,
    /// Every non-null value is a timestamp.
    Timestamp,
    /// No non-null values at all.
    Empty,
}

impl ColumnType {
    /// Derive the tag from a column's values.
    pub fn infer(values: &[Value]) -> Self {
        let mut kind = ColumnType::Empty;
        for value in values {
            let this = match value {
                Value::Null => continue,
                Value::Text(_) => return ColumnType::Text,
                Value::Number(_) => ColumnType::Number,
                Value::Timestamp(_) => ColumnType::Timestamp,
            };
            if kind == ColumnType::Empty {
                kind = this;
            } else if kind != this {
                return ColumnType::Text;
            }
        }
        kind
    }

    /// Short label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Empty => "empty",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
