// SPDX-License-Identifier: Apache-2.0

use crate::components::{company_heading, detail, expiry};
use crate::shape::RowShape;
use maud::{html, Markup};
use relief_model::{LinkedText, SheetDate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscountRow {
    pub company: LinkedText,
    pub discount: String,
    pub code: String,
    pub details: String,
    pub expiration: SheetDate,
    pub notes: String,
}

impl DiscountRow {
    #[must_use]
    pub fn shape() -> RowShape<Self> {
        RowShape::<Self>::new("DiscountRow")
            .linked_text("company", "Company", |r, v| r.company = v)
            .text("discount", "Discount", |r, v| r.discount = v)
            .text("code", "Code", |r, v| r.code = v)
            .text("details", "Details", |r, v| r.details = v)
            .date("expiration", "Expiration", |r, v| r.expiration = v)
            .text("notes", "Notes", |r, v| r.notes = v)
    }

    #[must_use]
    pub fn render(&self) -> Markup {
        html! {
            article class="row-card row-card--discount" {
                (company_heading(&self.company))
                @if !self.discount.is_empty() {
                    p class="row-card__headline" { (self.discount) }
                }
                @if !self.code.is_empty() {
                    p class="row-card__code" {
                        span class="row-card__label" { "Code: " }
                        code data-code=(self.code) { (self.code) }
                    }
                }
                (detail("Details", &self.details))
                (expiry("Expires", &self.expiration))
                (detail("Notes", &self.notes))
            }
        }
    }
}
