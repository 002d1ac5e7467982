// Annotation rows as read from the gold-standard CSV

use csv::StringRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Column holding the 1-based sentence index
pub const SENTENCE_COLUMN: &str = "sentence";

/// Column holding the annotated component name
pub const COMPONENT_COLUMN: &str = "componentName";

/// One raw CSV record with its values keyed by header name, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRow {
    columns: Vec<(String, Option<String>)>,
    extra: Vec<String>,
}

/// What a row refers to, or why it does not refer to anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowReference {
    /// Both fields present and the index parsed. `sentence_index` is 0-based
    /// and may be negative for rows that name sentence 0 or below. Integers
    /// too large for `i64` saturate.
    Valid {
        sentence_index: i64,
        component_name: String,
    },
    MissingField(&'static str),
    UnparsableIndex(String),
}

impl AnnotationRow {
    /// Pair a record with the header row. Short records leave trailing
    /// columns missing; surplus values are kept as unnamed extras.
    pub fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), record.get(i).map(str::to_string)))
            .collect();
        let extra = record.iter().skip(headers.len()).map(str::to_string).collect();
        Self { columns, extra }
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> Self {
        let columns = pairs
            .iter()
            .map(|(k, v)| (k.as_ref().to_string(), Some(v.as_ref().to_string())))
            .collect();
        Self { columns, extra: Vec::new() }
    }

    /// Value of a column. With duplicate headers the last column wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn component_name(&self) -> Option<&str> {
        self.get(COMPONENT_COLUMN)
    }

    pub fn reference(&self) -> RowReference {
        let Some(raw_index) = self.get(SENTENCE_COLUMN) else {
            return RowReference::MissingField(SENTENCE_COLUMN);
        };
        let Some(sentence_number) = parse_sentence_number(raw_index) else {
            return RowReference::UnparsableIndex(raw_index.to_string());
        };
        let Some(component_name) = self.component_name() else {
            return RowReference::MissingField(COMPONENT_COLUMN);
        };

        RowReference::Valid {
            sentence_index: sentence_number.saturating_sub(1),
            component_name: component_name.to_string(),
        }
    }
}

/// Parse a 1-based sentence number. Well-formed integers outside the `i64`
/// range saturate instead of failing, since they are out of bounds either way.
fn parse_sentence_number(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(number) = trimmed.parse::<i64>() {
        return Some(number);
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

/// Quote a string the way a Python `repr` does: single quotes unless the
/// value contains a single quote and no double quote.
fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    let quote = if value.contains('\'') && !value.contains('"') { '"' } else { '\'' };

    write!(f, "{quote}")?;
    for ch in value.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\t' => f.write_str("\\t")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            c if c == quote => write!(f, "\\{c}")?,
            c if c.is_control() && (c as u32) < 0x100 => write!(f, "\\x{:02x}", c as u32)?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

/// Renders as `{'sentence': '2', 'componentName': 'Kafka'}`.
impl fmt::Display for AnnotationRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.columns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_quoted(f, name)?;
            f.write_str(": ")?;
            match value {
                Some(value) => write_quoted(f, value)?,
                None => f.write_str("None")?,
            }
        }
        if !self.extra.is_empty() {
            if !self.columns.is_empty() {
                f.write_str(", ")?;
            }
            f.write_str("None: [")?;
            for (i, value) in self.extra.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_quoted(f, value)?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}

impl Serialize for AnnotationRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
