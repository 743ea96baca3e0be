// SPDX-License-Identifier: Apache-2.0

use crate::components::{company_heading, detail, expiry};
use crate::shape::RowShape;
use maud::{html, Markup};
use relief_model::{LinkedText, SheetDate};

/// A company giving away a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreeProductRow {
    pub company: LinkedText,
    pub product: String,
    pub description: String,
    pub eligibility: String,
    pub how_to_claim: String,
    pub expiration: SheetDate,
    pub notes: String,
}

impl FreeProductRow {
    #[must_use]
    pub fn shape() -> RowShape<Self> {
        RowShape::<Self>::new("FreeProductRow")
            .linked_text("company", "Company", |r, v| r.company = v)
            .text("product", "Product", |r, v| r.product = v)
            .text("description", "Description", |r, v| r.description = v)
            .text("eligibility", "Eligibility", |r, v| r.eligibility = v)
            .text("how_to_claim", "How to Claim", |r, v| r.how_to_claim = v)
            .date("expiration", "Expiration", |r, v| r.expiration = v)
            .text("notes", "Notes", |r, v| r.notes = v)
    }

    #[must_use]
    pub fn render(&self) -> Markup {
        html! {
            article class="row-card row-card--free-product" {
                (company_heading(&self.company))
                @if !self.product.is_empty() {
                    p class="row-card__headline" { (self.product) }
                }
                (detail("Description", &self.description))
                (detail("Eligibility", &self.eligibility))
                (detail("How to claim", &self.how_to_claim))
                (expiry("Expires", &self.expiration))
                (detail("Notes", &self.notes))
            }
        }
    }
}
