// SPDX-License-Identifier: Apache-2.0

use crate::components::{company_heading, detail, expiry};
use crate::shape::RowShape;
use maud::{html, Markup};
use relief_model::{LinkedText, SheetDate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRow {
    pub company: LinkedText,
    pub service: String,
    pub details: String,
    pub how_to_access: String,
    pub expiration: SheetDate,
    pub notes: String,
}

impl ServiceRow {
    #[must_use]
    pub fn shape() -> RowShape<Self> {
        RowShape::<Self>::new("ServiceRow")
            .linked_text("company", "Company", |r, v| r.company = v)
            .text("service", "Service", |r, v| r.service = v)
            .text("details", "Details", |r, v| r.details = v)
            .text("how_to_access", "How to Access", |r, v| r.how_to_access = v)
            .date("expiration", "Expiration", |r, v| r.expiration = v)
            .text("notes", "Notes", |r, v| r.notes = v)
    }

    #[must_use]
    pub fn render(&self) -> Markup {
        html! {
            article class="row-card row-card--service" {
                (company_heading(&self.company))
                @if !self.service.is_empty() {
                    p class="row-card__headline" { (self.service) }
                }
                (detail("Details", &self.details))
                (detail("How to access", &self.how_to_access))
                (expiry("Available until", &self.expiration))
                (detail("Notes", &self.notes))
            }
        }
    }
}
