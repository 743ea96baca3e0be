// SPDX-License-Identifier: Apache-2.0

use crate::http::errors::{ApiFailure, ServerError};
use crate::http::request_tracing::RequestTrace;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use relief_cards::components::sheet_tabs;
use relief_cards::{render_sheet, EmptySheet, SheetRender};
use relief_model::{normalize_spreadsheet_id, SheetLookupError, TabInfo};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabsRequest {
    pub sheet_id: String,
}

#[derive(Debug, Serialize)]
pub struct SheetDataResponse {
    pub html: String,
}

fn spreadsheet_id(raw: &str) -> Result<&str, ServerError> {
    let id = normalize_spreadsheet_id(raw);
    if id.is_empty() {
        return Err(ServerError::InvalidRequest(
            "sheet id must not be empty".to_string(),
        ));
    }
    Ok(id)
}

/// Tabs of a configured spreadsheet, flagged by whether a component is
/// configured for them.
async fn load_tabs(state: &AppState, id: &str) -> Result<Vec<TabInfo>, ServerError> {
    let configured = state
        .sheets
        .tabs(id)
        .ok_or_else(|| SheetLookupError::UnknownSpreadsheet(id.to_string()))?;
    let titles = state.source.tab_titles(id).await?;
    Ok(titles
        .into_iter()
        .map(|title| TabInfo {
            has_config: configured.contains_key(&title),
            title,
        })
        .collect())
}

async fn render_tab(state: &AppState, id: &str, tab: &str) -> Result<SheetRender, ServerError> {
    let tab_config = state.sheets.resolve(id, tab)?;
    let card = state
        .registry
        .lookup(&tab_config.component)
        .ok_or_else(|| ServerError::UnknownComponent(tab_config.component.clone()))?;
    let data = state
        .source
        .sheet_rows(id, tab, &tab_config.range)
        .await?;
    let rendered = render_sheet(card, &data).map_err(|EmptySheet| ServerError::EmptySheet)?;
    info!(
        spreadsheet_id = id,
        tab,
        component = card.name(),
        backend = state.source.backend_tag(),
        rendered = rendered.rendered,
        skipped = rendered.skipped.len(),
        "sheet rendered"
    );
    Ok(rendered)
}

pub(crate) async fn sheet_tabs_handler(
    State(state): State<AppState>,
    trace: RequestTrace,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<TabInfo>>, ApiFailure> {
    let id = spreadsheet_id(&raw_id).map_err(|e| e.for_request(&trace))?;
    load_tabs(&state, id)
        .await
        .map(Json)
        .map_err(|e| e.for_request(&trace))
}

pub(crate) async fn sheet_data_handler(
    State(state): State<AppState>,
    trace: RequestTrace,
    Path((raw_id, tab)): Path<(String, String)>,
) -> Result<Json<SheetDataResponse>, ApiFailure> {
    let id = spreadsheet_id(&raw_id).map_err(|e| e.for_request(&trace))?;
    let rendered = render_tab(&state, id, &tab)
        .await
        .map_err(|e| e.for_request(&trace))?;
    Ok(Json(SheetDataResponse {
        html: rendered.markup.into_string(),
    }))
}

async fn render_tabs_html(state: &AppState, raw_id: &str) -> Result<Html<String>, ServerError> {
    let id = spreadsheet_id(raw_id)?;
    let tabs = load_tabs(state, id).await?;
    Ok(Html(sheet_tabs(id, &tabs).into_string()))
}

pub(crate) async fn render_sheet_tabs_post_handler(
    State(state): State<AppState>,
    trace: RequestTrace,
    body: Result<Json<TabsRequest>, JsonRejection>,
) -> Result<Html<String>, ApiFailure> {
    let request = body
        .map_err(|e| ServerError::InvalidRequest(e.body_text()).for_request(&trace))?;
    render_tabs_html(&state, &request.sheet_id)
        .await
        .map_err(|e| e.for_request(&trace))
}

pub(crate) async fn render_sheet_tabs_get_handler(
    State(state): State<AppState>,
    trace: RequestTrace,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, ApiFailure> {
    render_tabs_html(&state, &raw_id)
        .await
        .map_err(|e| e.for_request(&trace))
}
