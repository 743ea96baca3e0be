// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Spreadsheet holding the company lists rendered as cards.
pub const DISASTER_RELIEF_SHEET_ID: &str = "1L0dQpfj3c86mXRjADRrLshUCZrFzA3vcM_TfYxITjmc";

const SPREADSHEET_URL_MARKERS: [&str; 2] = ["spreadsheets/d/", "docs.google.com/spreadsheets/d/"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetLookupError {
    UnknownSpreadsheet(String),
    UnknownTab { spreadsheet_id: String, tab: String },
}

impl Display for SheetLookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSpreadsheet(id) => {
                write!(f, "no configuration found for spreadsheet ID: {id}")
            }
            Self::UnknownTab {
                spreadsheet_id,
                tab,
            } => write!(
                f,
                "no configuration found for tab {tab:?} of spreadsheet {spreadsheet_id}"
            ),
        }
    }
}

impl std::error::Error for SheetLookupError {}

/// Which card component renders a tab, and the cell range holding its header
/// row followed by data rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TabConfig {
    #[serde(alias = "Component")]
    pub component: String,
    #[serde(alias = "StructuredDataRange")]
    pub range: String,
}

impl TabConfig {
    #[must_use]
    pub fn new(component: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            range: range.into(),
        }
    }
}

/// spreadsheet ID → tab name → tab configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetConfig {
    sheets: BTreeMap<String, BTreeMap<String, TabConfig>>,
}

impl SheetConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tabs of the disaster relief company list.
    #[must_use]
    pub fn builtin() -> Self {
        let mut config = Self::new();
        for (tab, component, range) in [
            ("Company List - Free Product", "FreeProductCard", "A6:G"),
            ("Company List - Discount Codes", "DiscountCard", "A6:F"),
            ("Company List - Free Product Pick-ups", "PickupCard", "A6:D"),
            ("Company List - Free Services", "ServiceCard", "A6:F"),
        ] {
            config.insert(
                DISASTER_RELIEF_SHEET_ID,
                tab,
                TabConfig::new(component, range),
            );
        }
        config
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        let config: Self = serde_json::from_slice(bytes)
            .map_err(|e| ValidationError(format!("sheet config parse failed: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn insert(&mut self, spreadsheet_id: &str, tab: &str, config: TabConfig) {
        self.sheets
            .entry(spreadsheet_id.to_string())
            .or_default()
            .insert(tab.to_string(), config);
    }

    #[must_use]
    pub fn tabs(&self, spreadsheet_id: &str) -> Option<&BTreeMap<String, TabConfig>> {
        self.sheets.get(spreadsheet_id)
    }

    pub fn resolve(&self, spreadsheet_id: &str, tab: &str) -> Result<&TabConfig, SheetLookupError> {
        let tabs = self
            .tabs(spreadsheet_id)
            .ok_or_else(|| SheetLookupError::UnknownSpreadsheet(spreadsheet_id.to_string()))?;
        tabs.get(tab).ok_or_else(|| SheetLookupError::UnknownTab {
            spreadsheet_id: spreadsheet_id.to_string(),
            tab: tab.to_string(),
        })
    }

    /// Every `(spreadsheet ID, tab, config)` triple in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &TabConfig)> {
        self.sheets.iter().flat_map(|(id, tabs)| {
            tabs.iter()
                .map(move |(tab, cfg)| (id.as_str(), tab.as_str(), cfg))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.values().all(BTreeMap::is_empty)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (id, tab, cfg) in self.entries() {
            if id.trim().is_empty() {
                return Err(ValidationError("spreadsheet ID must not be empty".to_string()));
            }
            if cfg.component.trim().is_empty() {
                return Err(ValidationError(format!(
                    "tab {tab:?} of {id} has an empty component"
                )));
            }
            if cfg.range.trim().is_empty() {
                return Err(ValidationError(format!(
                    "tab {tab:?} of {id} has an empty range"
                )));
            }
        }
        Ok(())
    }
}

/// Extracts the spreadsheet ID from a Google Sheets URL such as
/// `https://docs.google.com/spreadsheets/d/{ID}/edit`.
#[must_use]
pub fn extract_spreadsheet_id(url: &str) -> Option<&str> {
    SPREADSHEET_URL_MARKERS.iter().find_map(|marker| {
        let start = url.find(marker)? + marker.len();
        let rest = &url[start..];
        let end = rest.find(['/', '?']).unwrap_or(rest.len());
        Some(&rest[..end])
    })
}

/// Accepts either a bare spreadsheet ID or a spreadsheet URL.
#[must_use]
pub fn normalize_spreadsheet_id(input: &str) -> &str {
    let trimmed = input.trim();
    extract_spreadsheet_id(trimmed).unwrap_or(trimmed)
}
