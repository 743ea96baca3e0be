// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row as returned by the sheet source. `None` is an absent cell.
pub type RawRow = Vec<Option<Cell>>;

/// An untyped spreadsheet cell.
///
/// Cells carrying a hyperlink arrive as a map with `text` and `link` keys;
/// everything else is whatever JSON value the source produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Map(Map<String, Value>),
    Other(Value),
}

impl Cell {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn linked(text: impl Into<String>, link: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("text".to_string(), Value::String(text.into()));
        map.insert("link".to_string(), Value::String(link.into()));
        Self::Map(map)
    }

    /// Converts a JSON value from the sheet source; `null` is an absent cell.
    #[must_use]
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Text(s)),
            Value::Object(map) => Some(Self::Map(map)),
            other => Some(Self::Other(other)),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// String value stored under `key` when this cell is a map.
    #[must_use]
    pub fn map_str(&self, key: &str) -> Option<&str> {
        match self {
            Self::Map(map) => map.get(key).and_then(Value::as_str),
            _ => None,
        }
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Map(_) => "map",
            Self::Other(Value::Null) => "null",
            Self::Other(Value::Bool(_)) => "bool",
            Self::Other(Value::Number(_)) => "number",
            Self::Other(Value::Array(_)) => "array",
            Self::Other(Value::String(_)) => "string",
            Self::Other(Value::Object(_)) => "map",
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Display text with an optional hyperlink, e.g. a company name cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkedText {
    pub text: String,
    pub link: String,
}

impl LinkedText {
    #[must_use]
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }

    #[must_use]
    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }
}

/// A date cell. The default value is the zero date (no date present).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetDate(Option<DateTime<FixedOffset>>);

impl SheetDate {
    #[must_use]
    pub fn new(value: DateTime<FixedOffset>) -> Self {
        Self(Some(value))
    }

    #[must_use]
    pub fn zero() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    #[must_use]
    pub fn value(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }

    /// Calendar date in the offset the value was written with.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.0.map(|dt| dt.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_null_is_an_absent_cell() {
        assert_eq!(Cell::from_json(Value::Null), None);
        assert_eq!(Cell::from_json(json!("x")), Some(Cell::text("x")));
        assert_eq!(
            Cell::from_json(json!(3)).map(|c| c.kind_name()),
            Some("number")
        );
    }

    #[test]
    fn linked_cell_exposes_text_and_link() {
        let cell = Cell::linked("Acme", "http://acme.example");
        assert_eq!(cell.map_str("text"), Some("Acme"));
        assert_eq!(cell.map_str("link"), Some("http://acme.example"));
        assert_eq!(cell.as_str(), None);
    }

    #[test]
    fn raw_rows_deserialize_from_source_json() {
        let row: RawRow =
            serde_json::from_value(json!(["a", null, {"text": "t", "link": "l"}, 1.5]))
                .expect("raw row");
        assert_eq!(row[0], Some(Cell::text("a")));
        assert_eq!(row[1], None);
        assert_eq!(row[2], Some(Cell::linked("t", "l")));
        assert_eq!(row[3].as_ref().map(Cell::kind_name), Some("number"));
    }

    #[test]
    fn default_sheet_date_is_zero() {
        assert!(SheetDate::default().is_zero());
        assert_eq!(SheetDate::zero().date(), None);
    }
}
