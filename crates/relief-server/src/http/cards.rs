// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::extract::State;
use axum::Json;
use relief_cards::FieldDescriptor;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CardSummary {
    pub name: String,
    pub shape: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

/// Every registered card kind with the columns it reads.
pub(crate) async fn cards_handler(State(state): State<AppState>) -> Json<Vec<CardSummary>> {
    let cards = state
        .registry
        .names()
        .into_iter()
        .filter_map(|name| state.registry.lookup(name))
        .map(|card| CardSummary {
            name: card.name().to_string(),
            shape: card.shape_name(),
            fields: card.fields(),
        })
        .collect();
    Json(cards)
}
