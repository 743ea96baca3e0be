// SPDX-License-Identifier: Apache-2.0

//! Where sheet rows come from.

use async_trait::async_trait;
use relief_model::RawRow;

pub mod fake;
pub mod google;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("spreadsheet not found: {0}")]
    NotFound(String),
    #[error("no data found in range {0}")]
    EmptyRange(String),
    #[error("sheet request failed: {0}")]
    Request(String),
    #[error("sheet upstream returned status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("sheet response decode failed: {0}")]
    Decode(String),
}

/// A spreadsheet backend. Rows are returned as raw cells; the first row of a
/// configured tab range is its header.
#[async_trait]
pub trait SheetSource: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str;

    async fn tab_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, SourceError>;

    /// Header row followed by data rows of `range` on `tab`. Blank rows are
    /// dropped; hyperlinked cells arrive as `{text, link}` maps.
    async fn sheet_rows(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        range: &str,
    ) -> Result<Vec<RawRow>, SourceError>;

    /// Plain formatted values of an A1 `range`.
    async fn values(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<RawRow>, SourceError>;
}

/// A1 notation for `range` on `tab`, quoting the tab name.
#[must_use]
pub fn a1_range(tab: &str, range: &str) -> String {
    format!("'{}'!{range}", tab.replace('\'', "''"))
}
