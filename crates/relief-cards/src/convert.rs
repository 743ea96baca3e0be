// SPDX-License-Identifier: Apache-2.0

//! Cell → field value conversion.
//!
//! Every conversion is total over absent cells: a missing cell always yields
//! the zero value of the target kind.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use relief_model::{Cell, LinkedText, SheetDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Date,
    LinkedText,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(SheetDate),
    LinkedText(LinkedText),
}

impl FieldValue {
    #[must_use]
    pub fn zero(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => Self::Text(String::new()),
            FieldKind::Date => Self::Date(SheetDate::zero()),
            FieldKind::LinkedText => Self::LinkedText(LinkedText::default()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Date(_) => FieldKind::Date,
            Self::LinkedText(_) => FieldKind::LinkedText,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("expected string for date, got {found}")]
    DateNotText { found: &'static str },
    #[error("cannot parse date {input:?}: {reason}")]
    UnparseableDate { input: String, reason: String },
    #[error("unexpected type for linked text: {found}")]
    UnexpectedLinkedText { found: &'static str },
    #[error("expected string or map-like value, got {found}")]
    UnexpectedText { found: &'static str },
}

#[derive(Debug, Clone, Copy)]
enum DateFormat {
    Pattern(&'static str),
    Rfc3339,
}

// Order matters: the first format that parses wins.
const DATE_FORMATS: [DateFormat; 8] = [
    DateFormat::Pattern("%-m/%-d/%y"),
    DateFormat::Pattern("%m/%d/%y"),
    DateFormat::Pattern("%-m/%-d/%Y"),
    DateFormat::Pattern("%m/%d/%Y"),
    DateFormat::Pattern("%Y-%m-%d"),
    DateFormat::Rfc3339,
    DateFormat::Pattern("%B %-d, %Y"),
    DateFormat::Pattern("%b %-d, %Y"),
];

impl DateFormat {
    /// Digits a `/`-separated pattern requires in its trailing year segment.
    fn slash_year_width(self) -> Option<usize> {
        match self {
            Self::Pattern(pattern) if pattern.ends_with("/%y") => Some(2),
            Self::Pattern(pattern) if pattern.ends_with("/%Y") => Some(4),
            _ => None,
        }
    }

    fn parse(self, input: &str) -> Result<DateTime<FixedOffset>, String> {
        if let Some(width) = self.slash_year_width() {
            let year = input.rsplit('/').next().unwrap_or_default();
            if year.len() != width || !year.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("year must have {width} digits"));
            }
        }
        match self {
            Self::Pattern(pattern) => NaiveDate::parse_from_str(input, pattern)
                .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
                .map_err(|e| e.to_string()),
            Self::Rfc3339 => DateTime::parse_from_rfc3339(input).map_err(|e| e.to_string()),
        }
    }
}

/// Parses a date written in any of the supported sheet formats.
pub fn parse_sheet_date(input: &str) -> Result<DateTime<FixedOffset>, ConvertError> {
    let mut last_reason = String::new();
    for format in DATE_FORMATS {
        match format.parse(input) {
            Ok(parsed) => return Ok(parsed),
            Err(reason) => last_reason = reason,
        }
    }
    Err(ConvertError::UnparseableDate {
        input: input.to_string(),
        reason: last_reason,
    })
}

pub fn convert_date(cell: Option<&Cell>) -> Result<SheetDate, ConvertError> {
    let Some(cell) = cell else {
        return Ok(SheetDate::zero());
    };
    let input = cell.as_str().ok_or(ConvertError::DateNotText {
        found: cell.kind_name(),
    })?;
    if input.is_empty() {
        return Ok(SheetDate::zero());
    }
    parse_sheet_date(input).map(SheetDate::new)
}

pub fn convert_linked_text(cell: Option<&Cell>) -> Result<LinkedText, ConvertError> {
    match cell {
        None => Ok(LinkedText::default()),
        Some(Cell::Text(text)) => Ok(LinkedText::new(text.clone(), String::new())),
        Some(map @ Cell::Map(inner)) => {
            let text = map.map_str("text").ok_or(ConvertError::UnexpectedLinkedText {
                found: "map without text",
            })?;
            let link = match inner.get("link") {
                None => "",
                Some(value) => value.as_str().ok_or(ConvertError::UnexpectedLinkedText {
                    found: "map with non-string link",
                })?,
            };
            Ok(LinkedText::new(text, link))
        }
        Some(other) => Err(ConvertError::UnexpectedLinkedText {
            found: other.kind_name(),
        }),
    }
}

pub fn convert_text(cell: Option<&Cell>) -> Result<String, ConvertError> {
    match cell {
        None => Ok(String::new()),
        Some(Cell::Text(text)) => Ok(text.clone()),
        Some(map @ Cell::Map(inner)) => Ok(match map.map_str("text") {
            Some(text) => text.to_string(),
            None => serde_json::Value::Object(inner.clone()).to_string(),
        }),
        Some(other) => Err(ConvertError::UnexpectedText {
            found: other.kind_name(),
        }),
    }
}

/// Converts `cell` into a value of `kind`.
pub fn convert(cell: Option<&Cell>, kind: FieldKind) -> Result<FieldValue, ConvertError> {
    match kind {
        FieldKind::Text => convert_text(cell).map(FieldValue::Text),
        FieldKind::Date => convert_date(cell).map(FieldValue::Date),
        FieldKind::LinkedText => convert_linked_text(cell).map(FieldValue::LinkedText),
    }
}

/// Field types a row shape can hold.
pub trait FromCell: Sized + Default {
    const KIND: FieldKind;

    fn from_cell(cell: Option<&Cell>) -> Result<Self, ConvertError>;
}

impl FromCell for String {
    const KIND: FieldKind = FieldKind::Text;

    fn from_cell(cell: Option<&Cell>) -> Result<Self, ConvertError> {
        convert_text(cell)
    }
}

impl FromCell for SheetDate {
    const KIND: FieldKind = FieldKind::Date;

    fn from_cell(cell: Option<&Cell>) -> Result<Self, ConvertError> {
        convert_date(cell)
    }
}

impl FromCell for LinkedText {
    const KIND: FieldKind = FieldKind::LinkedText;

    fn from_cell(cell: Option<&Cell>) -> Result<Self, ConvertError> {
        convert_linked_text(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn every_supported_format_yields_the_same_calendar_date() {
        for input in [
            "3/7/24",
            "03/07/24",
            "3/7/2024",
            "03/07/2024",
            "2024-03-07",
            "2024-03-07T10:30:00Z",
            "March 7, 2024",
            "Mar 7, 2024",
        ] {
            let date = convert_date(Some(&Cell::text(input))).expect(input);
            assert_eq!(date.date(), Some(ymd(2024, 3, 7)), "{input}");
        }
    }

    #[test]
    fn rfc3339_keeps_its_offset() {
        let parsed = parse_sheet_date("2024-03-07T23:30:00-05:00").expect("rfc3339");
        assert_eq!(parsed.date_naive(), ymd(2024, 3, 7));
        assert_eq!(parsed.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn two_digit_years_land_in_the_current_century() {
        let date = convert_date(Some(&Cell::text("12/31/05"))).expect("date");
        assert_eq!(date.date(), Some(ymd(2005, 12, 31)));
    }

    #[test]
    fn slash_dates_need_two_or_four_digit_years() {
        for input in ["1/2/3", "1/2/024", "01/02/20245"] {
            let err = convert_date(Some(&Cell::text(input))).expect_err(input);
            assert!(
                matches!(err, ConvertError::UnparseableDate { .. }),
                "{input}: {err}"
            );
        }
        let date = convert_date(Some(&Cell::text("1/2/03"))).expect("two digits");
        assert_eq!(date.date(), Some(ymd(2003, 1, 2)));
    }

    #[test]
    fn empty_date_string_is_the_zero_date() {
        assert!(convert_date(Some(&Cell::text(""))).expect("empty").is_zero());
    }

    #[test]
    fn unparseable_date_reports_input() {
        let err = convert_date(Some(&Cell::text("next tuesday"))).expect_err("bad date");
        assert!(matches!(
            err,
            ConvertError::UnparseableDate { ref input, .. } if input == "next tuesday"
        ));
        assert!(err.to_string().starts_with("cannot parse date"));
    }

    #[test]
    fn date_requires_text() {
        let err = convert_date(Some(&Cell::linked("1/2/24", "x"))).expect_err("map");
        assert_eq!(err, ConvertError::DateNotText { found: "map" });
    }

    #[test]
    fn absent_cell_is_zero_for_every_kind() {
        for kind in [FieldKind::Text, FieldKind::Date, FieldKind::LinkedText] {
            assert_eq!(convert(None, kind), Ok(FieldValue::zero(kind)));
        }
    }

    #[test]
    fn linked_text_from_map_and_plain_string() {
        let linked = convert_linked_text(Some(&Cell::linked("Acme", "http://acme.example")))
            .expect("linked");
        assert_eq!(linked, LinkedText::new("Acme", "http://acme.example"));

        let plain = convert_linked_text(Some(&Cell::text("Acme"))).expect("plain");
        assert_eq!(plain, LinkedText::new("Acme", ""));
    }

    #[test]
    fn linked_text_link_must_be_a_string_when_present() {
        let cell = Cell::from_json(json!({"text": "Acme", "link": 5})).expect("cell");
        assert_eq!(
            convert_linked_text(Some(&cell)),
            Err(ConvertError::UnexpectedLinkedText {
                found: "map with non-string link"
            })
        );

        let cell = Cell::from_json(json!({"text": "Acme"})).expect("cell");
        assert_eq!(
            convert_linked_text(Some(&cell)),
            Ok(LinkedText::new("Acme", ""))
        );
    }

    #[test]
    fn linked_text_rejects_numbers() {
        let cell = Cell::from_json(json!(42)).expect("cell");
        assert_eq!(
            convert_linked_text(Some(&cell)),
            Err(ConvertError::UnexpectedLinkedText { found: "number" })
        );
    }

    #[test]
    fn text_accepts_strings_and_maps() {
        assert_eq!(convert_text(Some(&Cell::text("x"))).as_deref(), Ok("x"));
        assert_eq!(
            convert_text(Some(&Cell::linked("Acme", "http://x"))).as_deref(),
            Ok("Acme")
        );
        let other_map = Cell::from_json(json!({"note": "n"})).expect("cell");
        assert_eq!(
            convert_text(Some(&other_map)).as_deref(),
            Ok(r#"{"note":"n"}"#)
        );
    }

    #[test]
    fn text_rejects_scalars_that_are_not_strings() {
        let cell = Cell::from_json(json!(true)).expect("cell");
        let err = convert_text(Some(&cell)).expect_err("bool");
        assert_eq!(err.to_string(), "expected string or map-like value, got bool");
    }
}
