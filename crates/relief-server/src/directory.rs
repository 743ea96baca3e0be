// SPDX-License-Identifier: Apache-2.0

//! Landing page categories and per-category resources, read from the
//! resources spreadsheet.

use relief_model::{Category, Cell, RawRow, Resource};
use std::collections::HashSet;
use tracing::warn;

/// Categories above this version are not published yet.
pub const MAX_PUBLISHED_VERSION: f32 = 1.1;

fn cell_text(row: &RawRow, index: usize) -> &str {
    row.get(index)
        .and_then(Option::as_ref)
        .and_then(Cell::as_str)
        .unwrap_or_default()
}

/// Rows are `[category, _, version]`. Unparsable versions are skipped with a
/// warning; names are de-duplicated in first-seen order.
#[must_use]
pub fn collect_categories(rows: &[RawRow]) -> Vec<Category> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();
    for row in rows.iter().filter(|row| row.len() >= 3) {
        let name = cell_text(row, 0);
        let raw_version = cell_text(row, 2);
        let version = match raw_version.trim().parse::<f32>() {
            Ok(v) => v,
            Err(e) => {
                warn!(category = name, version = raw_version, error = %e, "invalid category version");
                continue;
            }
        };
        if version > MAX_PUBLISHED_VERSION {
            continue;
        }
        if !name.is_empty() && seen.insert(name) {
            categories.push(Category::new(name));
        }
    }
    categories
}

/// Rows are `[name, description, category, link, ..]`.
#[must_use]
pub fn collect_resources(rows: &[RawRow], category: &str) -> Vec<Resource> {
    rows.iter()
        .filter(|row| row.len() >= 4 && cell_text(row, 2) == category)
        .map(|row| Resource {
            name: cell_text(row, 0).to_string(),
            description: cell_text(row, 1).to_string(),
            category: category.to_string(),
            link: cell_text(row, 3).to_string(),
        })
        .collect()
}
