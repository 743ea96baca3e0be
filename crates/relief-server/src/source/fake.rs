// SPDX-License-Identifier: Apache-2.0

use super::{a1_range, SheetSource, SourceError};
use async_trait::async_trait;
use relief_model::RawRow;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// In-memory sheet source for tests.
///
/// Tab rows are keyed by `(spreadsheet ID, tab)`, value ranges by
/// `(spreadsheet ID, A1 range)`. Unknown spreadsheets report `NotFound`.
#[derive(Default)]
pub struct FakeSheets {
    pub tabs: Mutex<HashMap<String, Vec<String>>>,
    pub rows: Mutex<HashMap<(String, String), Vec<RawRow>>>,
    pub values: Mutex<HashMap<(String, String), Vec<RawRow>>>,
    pub fail_with: Mutex<Option<SourceError>>,
    pub fetch_calls: AtomicU64,
}

impl FakeSheets {
    pub async fn set_tabs(&self, spreadsheet_id: &str, titles: &[&str]) {
        self.tabs.lock().await.insert(
            spreadsheet_id.to_string(),
            titles.iter().map(ToString::to_string).collect(),
        );
    }

    pub async fn set_rows(&self, spreadsheet_id: &str, tab: &str, rows: Vec<RawRow>) {
        self.rows
            .lock()
            .await
            .insert((spreadsheet_id.to_string(), tab.to_string()), rows);
    }

    pub async fn set_values(&self, spreadsheet_id: &str, range: &str, rows: Vec<RawRow>) {
        self.values
            .lock()
            .await
            .insert((spreadsheet_id.to_string(), range.to_string()), rows);
    }

    async fn check_failure(&self) -> Result<(), SourceError> {
        self.fetch_calls.fetch_add(1, Ordering::Relaxed);
        match self.fail_with.lock().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SheetSource for FakeSheets {
    fn backend_tag(&self) -> &'static str {
        "fake"
    }

    async fn tab_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, SourceError> {
        self.check_failure().await?;
        self.tabs
            .lock()
            .await
            .get(spreadsheet_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(spreadsheet_id.to_string()))
    }

    async fn sheet_rows(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        range: &str,
    ) -> Result<Vec<RawRow>, SourceError> {
        self.check_failure().await?;
        let rows = self
            .rows
            .lock()
            .await
            .get(&(spreadsheet_id.to_string(), tab.to_string()))
            .cloned()
            .unwrap_or_default();
        if rows.is_empty() {
            return Err(SourceError::EmptyRange(a1_range(tab, range)));
        }
        Ok(rows)
    }

    async fn values(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<RawRow>, SourceError> {
        self.check_failure().await?;
        self.values
            .lock()
            .await
            .get(&(spreadsheet_id.to_string(), range.to_string()))
            .cloned()
            .ok_or_else(|| SourceError::NotFound(spreadsheet_id.to_string()))
    }
}
