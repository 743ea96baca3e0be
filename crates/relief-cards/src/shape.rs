// SPDX-License-Identifier: Apache-2.0

//! Row shapes: the per-row-type schema tying source column labels to typed
//! setters.

use crate::convert::{ConvertError, FieldKind, FromCell};
use relief_model::{Cell, LinkedText, SheetDate};
use serde::Serialize;

enum Setter<R> {
    Text(fn(&mut R, String)),
    Date(fn(&mut R, SheetDate)),
    LinkedText(fn(&mut R, LinkedText)),
}

impl<R> Setter<R> {
    fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => String::KIND,
            Self::Date(_) => SheetDate::KIND,
            Self::LinkedText(_) => LinkedText::KIND,
        }
    }
}

/// A single declared field of a row shape.
pub struct FieldSpec<R> {
    name: &'static str,
    column: Option<&'static str>,
    setter: Setter<R>,
}

impl<R> FieldSpec<R> {
    #[must_use]
    pub fn text(name: &'static str, set: fn(&mut R, String)) -> Self {
        Self::with_setter(name, Setter::Text(set))
    }

    #[must_use]
    pub fn date(name: &'static str, set: fn(&mut R, SheetDate)) -> Self {
        Self::with_setter(name, Setter::Date(set))
    }

    #[must_use]
    pub fn linked_text(name: &'static str, set: fn(&mut R, LinkedText)) -> Self {
        Self::with_setter(name, Setter::LinkedText(set))
    }

    fn with_setter(name: &'static str, setter: Setter<R>) -> Self {
        Self {
            name,
            column: None,
            setter,
        }
    }

    /// Binds the field to a header label.
    #[must_use]
    pub fn column(mut self, label: &'static str) -> Self {
        self.column = Some(label);
        self
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn column_label(&self) -> Option<&'static str> {
        self.column
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.setter.kind()
    }

    /// Converts `cell` to this field's type and stores it on `row`.
    pub fn apply(&self, row: &mut R, cell: Option<&Cell>) -> Result<(), ConvertError> {
        match self.setter {
            Setter::Text(set) => set(row, String::from_cell(cell)?),
            Setter::Date(set) => set(row, SheetDate::from_cell(cell)?),
            Setter::LinkedText(set) => set(row, LinkedText::from_cell(cell)?),
        }
        Ok(())
    }

    #[must_use]
    pub fn describe(&self) -> FieldDescriptor {
        FieldDescriptor {
            name: self.name,
            column: self.column,
            kind: self.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub column: Option<&'static str>,
    pub kind: FieldKind,
}

/// Named, ordered set of fields for the row type `R`.
pub struct RowShape<R> {
    name: &'static str,
    fields: Vec<FieldSpec<R>>,
}

impl<R> RowShape<R> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldSpec<R>) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn text(self, name: &'static str, column: &'static str, set: fn(&mut R, String)) -> Self {
        self.field(FieldSpec::text(name, set).column(column))
    }

    #[must_use]
    pub fn date(
        self,
        name: &'static str,
        column: &'static str,
        set: fn(&mut R, SheetDate),
    ) -> Self {
        self.field(FieldSpec::date(name, set).column(column))
    }

    #[must_use]
    pub fn linked_text(
        self,
        name: &'static str,
        column: &'static str,
        set: fn(&mut R, LinkedText),
    ) -> Self {
        self.field(FieldSpec::linked_text(name, set).column(column))
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec<R>] {
        &self.fields
    }

    #[must_use]
    pub fn describe(&self) -> Vec<FieldDescriptor> {
        self.fields.iter().map(FieldSpec::describe).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        name: String,
        seen: SheetDate,
    }

    #[test]
    fn describe_reports_kinds_and_labels_in_declaration_order() {
        let shape = RowShape::<Probe>::new("Probe")
            .text("name", "Name", |r, v| r.name = v)
            .field(FieldSpec::date("seen", |r, v| r.seen = v));
        assert_eq!(
            shape.describe(),
            vec![
                FieldDescriptor {
                    name: "name",
                    column: Some("Name"),
                    kind: FieldKind::Text,
                },
                FieldDescriptor {
                    name: "seen",
                    column: None,
                    kind: FieldKind::Date,
                },
            ]
        );
    }

    #[test]
    fn apply_sets_the_converted_value() {
        let field = FieldSpec::<Probe>::text("name", |r, v| r.name = v);
        let mut probe = Probe::default();
        field
            .apply(&mut probe, Some(&Cell::linked("Acme", "http://x")))
            .expect("apply");
        assert_eq!(probe.name, "Acme");
        assert!(probe.seen.is_zero());
    }
}
