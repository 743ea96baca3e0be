// SPDX-License-Identifier: Apache-2.0

use crate::directory::{collect_categories, collect_resources};
use crate::http::errors::{ApiFailure, ServerError};
use crate::http::pages::index_page;
use crate::http::request_tracing::RequestTrace;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::Html;
use relief_cards::components::resources_list;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub struct ResourcesQuery {
    pub category: Option<String>,
}

pub(crate) async fn index_handler(
    State(state): State<AppState>,
    trace: RequestTrace,
) -> Result<Html<String>, ApiFailure> {
    let directory = &state.config.directory;
    let rows = state
        .source
        .values(&directory.spreadsheet_id, &directory.categories_range)
        .await
        .map_err(|e| ServerError::from(e).for_request(&trace))?;
    let categories = collect_categories(&rows);
    Ok(Html(index_page(&categories).into_string()))
}

pub(crate) async fn resources_handler(
    State(state): State<AppState>,
    trace: RequestTrace,
    Query(query): Query<ResourcesQuery>,
) -> Result<Html<String>, ApiFailure> {
    let category = query
        .category
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            ServerError::InvalidRequest("category is required".to_string()).for_request(&trace)
        })?;
    let directory = &state.config.directory;
    let rows = state
        .source
        .values(&directory.spreadsheet_id, &directory.resources_range)
        .await
        .map_err(|e| ServerError::from(e).for_request(&trace))?;
    let resources = collect_resources(&rows, &category);
    info!(category = %category, found = resources.len(), "resources listed");
    Ok(Html(resources_list(&resources).into_string()))
}
