// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// A resource category shown on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A disaster resource listed under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub description: String,
    pub category: String,
    pub link: String,
}

/// A spreadsheet tab and whether a card component is configured for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub title: String,
    #[serde(rename = "hasConfig")]
    pub has_config: bool,
}
