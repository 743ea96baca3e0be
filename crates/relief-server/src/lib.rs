#![forbid(unsafe_code)]
//! HTTP surface for the relief directory.
//!
//! Requests resolve a spreadsheet tab to a card component through the sheet
//! configuration, fetch its rows from a [`SheetSource`] and render them with
//! the shared [`CardRegistry`].

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use relief_cards::CardRegistry;
use relief_model::SheetConfig;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

pub mod config;
pub mod directory;
pub mod http;
mod middleware;
pub mod source;

pub use config::{
    load_sheet_config, validate_startup_config, ConfigError, DirectoryConfig, ServerConfig,
    SheetsClientConfig,
};
pub use http::errors::{ApiErrorCode, ServerError};
pub use source::fake::FakeSheets;
pub use source::google::GoogleSheetsBackend;
pub use source::{SheetSource, SourceError};

pub const CRATE_NAME: &str = "relief-server";

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CardRegistry>,
    pub sheets: Arc<SheetConfig>,
    pub source: Arc<dyn SheetSource>,
    pub config: Arc<ServerConfig>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    /// Built-in cards and sheet table with default settings.
    #[must_use]
    pub fn new(source: Arc<dyn SheetSource>) -> Self {
        Self::with_config(
            source,
            CardRegistry::with_builtin_cards(),
            SheetConfig::builtin(),
            ServerConfig::default(),
        )
    }

    #[must_use]
    pub fn with_config(
        source: Arc<dyn SheetSource>,
        registry: CardRegistry,
        sheets: SheetConfig,
        config: ServerConfig,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            sheets: Arc::new(sheets),
            source,
            config: Arc::new(config),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::directory::index_handler))
        .route("/healthz", get(http::healthz_handler))
        .route("/resources", post(http::directory::resources_handler))
        .route("/api/cards", get(http::cards::cards_handler))
        .route("/api/sheet-tabs/:id", get(http::sheets::sheet_tabs_handler))
        .route(
            "/api/sheet-data/:id/:tab",
            get(http::sheets::sheet_data_handler),
        )
        .route(
            "/api/render/sheet-tabs",
            post(http::sheets::render_sheet_tabs_post_handler),
        )
        .route(
            "/api/render/sheet-tabs/:id",
            get(http::sheets::render_sheet_tabs_get_handler),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .with_state(state)
}
