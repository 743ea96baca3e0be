// SPDX-License-Identifier: Apache-2.0

use super::{a1_range, SheetSource, SourceError};
use crate::config::SheetsClientConfig;
use async_trait::async_trait;
use relief_model::{Cell, RawRow};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{instrument, warn};

/// Google Sheets v4 REST backend authenticated with an API key or a bearer
/// token.
pub struct GoogleSheetsBackend {
    base_url: String,
    api_key: Option<String>,
    bearer: Option<String>,
    client: reqwest::Client,
}

impl GoogleSheetsBackend {
    pub fn new(config: &SheetsClientConfig) -> Result<Self, SourceError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| SourceError::Request(format!("invalid sheets base url: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Request(format!("sheets client init failed: {e}")))?;
        Ok(Self {
            base_url,
            api_key: config.api_key.clone(),
            bearer: config.bearer.clone(),
            client,
        })
    }

    fn spreadsheet_url(&self, spreadsheet_id: &str, tail: &[&str]) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SourceError::Request(format!("invalid sheets base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| SourceError::Request("sheets base url cannot be a base".to_string()))?
            .pop_if_empty()
            .push("spreadsheets")
            .push(spreadsheet_id)
            .extend(tail);
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    fn auth_headers(&self) -> Result<HeaderMap, SourceError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.bearer {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| SourceError::Request(format!("invalid auth header: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    #[instrument(name = "sheets_get_json", skip(self, url), fields(path = %url.path()))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        spreadsheet_id: &str,
        url: Url,
    ) -> Result<T, SourceError> {
        let shown_url = redact_key(&url);
        let resp = self
            .client
            .get(url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %shown_url, error = %e, "sheet request failed");
                SourceError::Request(e.without_url().to_string())
            })?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(spreadsheet_id.to_string()));
        }
        if !status.is_success() {
            warn!(url = %shown_url, status = status.as_u16(), "sheet upstream error");
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: shown_url,
            });
        }
        resp.json::<T>()
            .await
            .map_err(|e| SourceError::Decode(e.without_url().to_string()))
    }
}

fn redact_key(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}

#[async_trait]
impl SheetSource for GoogleSheetsBackend {
    fn backend_tag(&self) -> &'static str {
        "google_sheets"
    }

    async fn tab_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, SourceError> {
        let mut url = self.spreadsheet_url(spreadsheet_id, &[])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");
        let doc: SpreadsheetDoc = self.get_json(spreadsheet_id, url).await?;
        Ok(tab_titles(&doc))
    }

    async fn sheet_rows(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        range: &str,
    ) -> Result<Vec<RawRow>, SourceError> {
        let a1 = a1_range(tab, range);
        let mut url = self.spreadsheet_url(spreadsheet_id, &[])?;
        url.query_pairs_mut()
            .append_pair("ranges", &a1)
            .append_pair("includeGridData", "true")
            .append_pair(
                "fields",
                "sheets.data.rowData.values(formattedValue,hyperlink)",
            );
        let doc: SpreadsheetDoc = self.get_json(spreadsheet_id, url).await?;
        grid_rows(&doc, &a1)
    }

    async fn values(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<RawRow>, SourceError> {
        let url = self.spreadsheet_url(spreadsheet_id, &["values", range])?;
        let body: ValueRange = self.get_json(spreadsheet_id, url).await?;
        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(Cell::from_json).collect())
            .collect())
    }
}

#[derive(Debug, Default, Deserialize)]
struct SpreadsheetDoc {
    #[serde(default)]
    sheets: Vec<SheetDoc>,
}

#[derive(Debug, Default, Deserialize)]
struct SheetDoc {
    #[serde(default)]
    properties: Option<SheetProperties>,
    #[serde(default)]
    data: Vec<GridData>,
}

#[derive(Debug, Default, Deserialize)]
struct SheetProperties {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridData {
    #[serde(default)]
    row_data: Vec<RowData>,
}

#[derive(Debug, Default, Deserialize)]
struct RowData {
    #[serde(default)]
    values: Vec<CellData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellData {
    #[serde(default)]
    formatted_value: String,
    #[serde(default)]
    hyperlink: String,
}

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

fn tab_titles(doc: &SpreadsheetDoc) -> Vec<String> {
    doc.sheets
        .iter()
        .filter_map(|sheet| sheet.properties.as_ref())
        .map(|props| props.title.clone())
        .collect()
}

/// Rows of the first grid in `doc`. Rows with no non-empty formatted value
/// are skipped.
fn grid_rows(doc: &SpreadsheetDoc, a1: &str) -> Result<Vec<RawRow>, SourceError> {
    let rows = doc
        .sheets
        .first()
        .and_then(|sheet| sheet.data.first())
        .map(|grid| grid.row_data.as_slice())
        .unwrap_or_default();
    if rows.is_empty() {
        return Err(SourceError::EmptyRange(a1.to_string()));
    }
    Ok(rows
        .iter()
        .filter(|row| row.values.iter().any(|cell| !cell.formatted_value.is_empty()))
        .map(|row| row.values.iter().map(|cell| Some(grid_cell(cell))).collect())
        .collect())
}

fn grid_cell(cell: &CellData) -> Cell {
    if cell.hyperlink.is_empty() {
        Cell::text(cell.formatted_value.clone())
    } else {
        Cell::linked(cell.formatted_value.clone(), cell.hyperlink.clone())
    }
}
