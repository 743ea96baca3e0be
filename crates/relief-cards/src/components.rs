// SPDX-License-Identifier: Apache-2.0

//! HTML fragments shared by the card renderers and the request handlers.

use maud::{html, Markup};
use relief_model::{LinkedText, Resource, SheetDate, TabInfo};

/// Bare e-mail addresses become `mailto:` links.
#[must_use]
pub fn href_for(link: &str) -> String {
    if link.contains('@') && !link.starts_with("mailto:") {
        format!("mailto:{link}")
    } else {
        link.to_string()
    }
}

#[must_use]
pub fn format_date(date: &SheetDate) -> Option<String> {
    date.date().map(|d| d.format("%b %-d, %Y").to_string())
}

#[must_use]
pub fn company_heading(company: &LinkedText) -> Markup {
    html! {
        h3 class="row-card__company" {
            @if company.has_link() {
                a href=(href_for(&company.link)) target="_blank" rel="noopener noreferrer" {
                    (company.text)
                }
            } @else {
                (company.text)
            }
        }
    }
}

/// A labelled line; renders nothing when `value` is blank.
#[must_use]
pub fn detail(label: &str, value: &str) -> Markup {
    html! {
        @if !value.trim().is_empty() {
            p class="row-card__detail" {
                span class="row-card__label" { (label) ": " }
                (value)
            }
        }
    }
}

#[must_use]
pub fn expiry(label: &str, date: &SheetDate) -> Markup {
    html! {
        @if let Some(formatted) = format_date(date) {
            p class="row-card__detail row-card__detail--date" {
                span class="row-card__label" { (label) ": " }
                time datetime=(date.date().map(|d| d.to_string()).unwrap_or_default()) {
                    (formatted)
                }
            }
        }
    }
}

#[must_use]
pub fn row_card_container(cards: &[Markup]) -> Markup {
    html! {
        div class="row-card-container" {
            @if cards.is_empty() {
                p class="row-card-container__empty" { "No entries yet." }
            }
            @for card in cards {
                (card)
            }
        }
    }
}

#[must_use]
pub fn sheet_tabs(sheet_id: &str, tabs: &[TabInfo]) -> Markup {
    html! {
        nav class="sheet-tabs" data-sheet-id=(sheet_id) {
            @for tab in tabs {
                button type="button"
                    class="sheet-tabs__tab"
                    data-tab=(tab.title)
                    disabled[!tab.has_config] {
                    (tab.title)
                }
            }
        }
    }
}

#[must_use]
pub fn resources_list(resources: &[Resource]) -> Markup {
    html! {
        ul class="resources" {
            @for resource in resources {
                li class="resources__item" {
                    @if resource.link.is_empty() {
                        span class="resources__name" { (resource.name) }
                    } @else {
                        a class="resources__name" href=(href_for(&resource.link))
                            target="_blank" rel="noopener noreferrer" {
                            (resource.name)
                        }
                    }
                    @if !resource.description.is_empty() {
                        p class="resources__description" { (resource.description) }
                    }
                }
            }
        }
    }
}
