// SPDX-License-Identifier: Apache-2.0

use maud::{html, Markup, DOCTYPE};
use relief_model::{Category, DISASTER_RELIEF_SHEET_ID};
use reqwest::Url;

/// `/resources?category=…` with the category form-encoded.
fn resources_action(category: &str) -> String {
    let mut action = String::from("/resources");
    if let Ok(mut url) = Url::parse("http://localhost/resources") {
        url.query_pairs_mut().append_pair("category", category);
        if let Some(query) = url.query() {
            action.push('?');
            action.push_str(query);
        }
    }
    action
}

#[must_use]
pub fn index_page(categories: &[Category]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Disaster Relief Resources" }
            }
            body {
                header {
                    h1 { "Disaster Relief Resources" }
                }
                main {
                    section class="categories" {
                        h2 { "Categories" }
                        @if categories.is_empty() {
                            p class="categories__empty" { "No categories published yet." }
                        }
                        @for category in categories {
                            form class="categories__item" method="post"
                                action=(resources_action(&category.name)) {
                                button type="submit" { (category.name) }
                            }
                        }
                    }
                    section id="resources" {}
                    section class="company-list" data-sheet-id=(DISASTER_RELIEF_SHEET_ID) {
                        h2 { "Company offers" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_forms_post_encoded_queries() {
        assert_eq!(resources_action("Food Bank"), "/resources?category=Food+Bank");
        assert_eq!(resources_action("A&B"), "/resources?category=A%26B");
    }

    #[test]
    fn index_lists_categories_in_order() {
        let html = index_page(&[Category::new("Food"), Category::new("Shelter")]).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        let food = html.find(">Food<").expect("food");
        let shelter = html.find(">Shelter<").expect("shelter");
        assert!(food < shelter);
    }
}
