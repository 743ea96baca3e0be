// SPDX-License-Identifier: Apache-2.0

use crate::convert::ConvertError;
use crate::shape::RowShape;
use relief_model::Cell;
use std::collections::HashMap;
use tracing::warn;

/// Header label → position within a raw row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    indices: HashMap<String, usize>,
}

impl ColumnMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map from a header row. Headers that are not plain strings
    /// are skipped; a repeated label resolves to its last position.
    #[must_use]
    pub fn from_header(header: &[Option<Cell>]) -> Self {
        let mut columns = Self::new();
        for (index, cell) in header.iter().enumerate() {
            match cell.as_ref().and_then(Cell::as_str) {
                Some(label) => columns.insert(label, index),
                None => warn!(
                    index,
                    kind = cell.as_ref().map_or("absent", Cell::kind_name),
                    "header is not a string; column skipped"
                ),
            }
        }
        columns
    }

    pub fn insert(&mut self, label: impl Into<String>, index: usize) {
        self.indices.insert(label.into(), index);
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<usize> {
        self.indices.get(label).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for ColumnMap {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut columns = Self::new();
        for (label, index) in iter {
            columns.insert(label, index);
        }
        columns
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to convert value for field {field} (column {column:?}): {source}")]
pub struct MapError {
    pub field: &'static str,
    pub column: &'static str,
    #[source]
    pub source: ConvertError,
}

/// Populates a row of `shape` from `raw`, locating each labelled field
/// through `columns`.
///
/// Labels missing from `columns`, or pointing past the end of `raw`, leave
/// the field at its zero value.
pub fn map_row<R: Default>(
    shape: &RowShape<R>,
    raw: &[Option<Cell>],
    columns: &ColumnMap,
) -> Result<R, MapError> {
    let mut row = R::default();
    for field in shape.fields() {
        let Some(label) = field.column_label() else {
            continue;
        };
        let Some(cell) = columns.get(label).and_then(|index| raw.get(index)) else {
            continue;
        };
        field
            .apply(&mut row, cell.as_ref())
            .map_err(|source| MapError {
                field: field.name(),
                column: label,
                source,
            })?;
    }
    Ok(row)
}

/// Populates a row of `shape` from a flat `[label, value, label, value, ..]`
/// sequence. Each label is located by scanning for the first string cell
/// equal to it; the cell after it is the value.
pub fn map_row_from_pairs<R: Default>(
    shape: &RowShape<R>,
    flat: &[Option<Cell>],
) -> Result<R, MapError> {
    let mut row = R::default();
    for field in shape.fields() {
        let Some(label) = field.column_label() else {
            continue;
        };
        let position = flat
            .iter()
            .position(|cell| cell.as_ref().and_then(Cell::as_str) == Some(label));
        let Some(value) = position.and_then(|index| flat.get(index + 1)) else {
            continue;
        };
        field
            .apply(&mut row, value.as_ref())
            .map_err(|source| MapError {
                field: field.name(),
                column: label,
                source,
            })?;
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::FieldSpec;
    use relief_model::{LinkedText, SheetDate};

    #[derive(Debug, Default, PartialEq)]
    struct Listing {
        name: String,
        link: LinkedText,
        expires: SheetDate,
        internal: String,
    }

    fn listing_shape() -> RowShape<Listing> {
        RowShape::<Listing>::new("Listing")
            .text("name", "Name", |r, v| r.name = v)
            .linked_text("link", "Link", |r, v| r.link = v)
            .date("expires", "Expires", |r, v| r.expires = v)
            .field(FieldSpec::text("internal", |r, v| r.internal = v))
    }

    fn row(cells: &[&str]) -> Vec<Option<Cell>> {
        cells.iter().map(|c| Some(Cell::text(*c))).collect()
    }

    #[test]
    fn header_and_plain_link_map_end_to_end() {
        let header = row(&["Name", "Link"]);
        let columns = ColumnMap::from_header(&header);
        let mapped: Listing =
            map_row(&listing_shape(), &row(&["Acme", "http://x"]), &columns).expect("row");
        assert_eq!(mapped.name, "Acme");
        assert_eq!(mapped.link, LinkedText::new("http://x", ""));
        assert!(mapped.expires.is_zero());
    }

    #[test]
    fn field_declaration_order_does_not_change_the_row() {
        let reordered = RowShape::<Listing>::new("Listing")
            .date("expires", "Expires", |r, v| r.expires = v)
            .field(FieldSpec::text("internal", |r, v| r.internal = v))
            .text("name", "Name", |r, v| r.name = v)
            .linked_text("link", "Link", |r, v| r.link = v);
        let header = row(&["Link", "Expires", "Name"]);
        let columns = ColumnMap::from_header(&header);
        let raw = vec![
            Some(Cell::linked("Acme", "https://acme.example")),
            Some(Cell::text("3/7/24")),
            Some(Cell::text("Acme Corp")),
        ];

        let declared = map_row(&listing_shape(), &raw, &columns).expect("declared order");
        let shuffled = map_row(&reordered, &raw, &columns).expect("reordered");
        assert_eq!(declared, shuffled);
        assert_eq!(declared.name, "Acme Corp");
        assert_eq!(declared.link, LinkedText::new("Acme", "https://acme.example"));
        assert!(!declared.expires.is_zero());
    }

    #[test]
    fn missing_and_out_of_range_columns_stay_zero() {
        let columns: ColumnMap = [("Name", 0), ("Expires", 7)].into_iter().collect();
        let mapped = map_row(&listing_shape(), &row(&["Acme", "1/2/24"]), &columns).expect("row");
        assert_eq!(
            mapped,
            Listing {
                name: "Acme".to_string(),
                ..Listing::default()
            }
        );
    }

    #[test]
    fn unlabelled_fields_are_never_read() {
        let columns: ColumnMap = [("internal", 0)].into_iter().collect();
        let mapped = map_row(&listing_shape(), &row(&["secret"]), &columns).expect("row");
        assert_eq!(mapped.internal, "");
    }

    #[test]
    fn conversion_failure_names_the_field() {
        let columns: ColumnMap = [("Name", 0), ("Expires", 1)].into_iter().collect();
        let err = map_row(&listing_shape(), &row(&["Acme", "soon"]), &columns)
            .expect_err("bad date");
        assert_eq!(err.field, "expires");
        assert_eq!(err.column, "Expires");
        assert!(matches!(err.source, ConvertError::UnparseableDate { .. }));
    }

    #[test]
    fn non_string_headers_are_skipped() {
        let header = vec![
            Some(Cell::text("Name")),
            None,
            Some(Cell::linked("Link", "http://x")),
            Some(Cell::text("Expires")),
        ];
        let columns = ColumnMap::from_header(&header);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns.get("Name"), Some(0));
        assert_eq!(columns.get("Link"), None);
        assert_eq!(columns.get("Expires"), Some(3));
    }

    #[test]
    fn pairs_locate_labels_by_scanning() {
        let flat = vec![
            Some(Cell::text("Link")),
            Some(Cell::linked("Acme", "http://acme.example")),
            Some(Cell::text("Name")),
            Some(Cell::text("Acme Co")),
            Some(Cell::text("Expires")),
        ];
        let mapped = map_row_from_pairs(&listing_shape(), &flat).expect("row");
        assert_eq!(mapped.name, "Acme Co");
        assert_eq!(mapped.link, LinkedText::new("Acme", "http://acme.example"));
        assert!(mapped.expires.is_zero());
    }
}
