// SPDX-License-Identifier: Apache-2.0

use crate::components::{company_heading, detail};
use crate::shape::RowShape;
use maud::{html, Markup};
use relief_model::LinkedText;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickupRow {
    pub company: LinkedText,
    pub location: String,
    pub hours: String,
    pub notes: String,
}

impl PickupRow {
    #[must_use]
    pub fn shape() -> RowShape<Self> {
        RowShape::<Self>::new("PickupRow")
            .linked_text("company", "Company", |r, v| r.company = v)
            .text("location", "Location", |r, v| r.location = v)
            .text("hours", "Hours", |r, v| r.hours = v)
            .text("notes", "Notes", |r, v| r.notes = v)
    }

    #[must_use]
    pub fn render(&self) -> Markup {
        html! {
            article class="row-card row-card--pickup" {
                (company_heading(&self.company))
                @if !self.location.is_empty() {
                    address class="row-card__location" { (self.location) }
                }
                (detail("Hours", &self.hours))
                (detail("Notes", &self.notes))
            }
        }
    }
}
