#![forbid(unsafe_code)]

use relief_cards::CardRegistry;
use relief_server::{
    build_router, load_sheet_config, validate_startup_config, AppState, GoogleSheetsBackend,
    ServerConfig, SheetSource,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = ServerConfig::from_env();
    init_tracing(config.log_json);

    let registry = CardRegistry::with_builtin_cards();
    let sheets = load_sheet_config(config.sheet_config_path.as_deref())
        .map_err(|e| format!("sheet config: {e}"))?;
    validate_startup_config(&config, &sheets, &registry)
        .map_err(|e| format!("invalid startup config: {e}"))?;
    if config.sheets.api_key.is_none() && config.sheets.bearer.is_none() {
        tracing::warn!("no sheets credentials configured; requests will be anonymous");
    }

    let backend = GoogleSheetsBackend::new(&config.sheets)
        .map_err(|e| format!("sheets backend: {e}"))?;
    let source: Arc<dyn SheetSource> = Arc::new(backend);
    let bind_addr = config.bind_addr.clone();
    info!(
        cards = ?registry.names(),
        backend = source.backend_tag(),
        "card registry ready"
    );
    let state = AppState::with_config(source, registry, sheets, config);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("relief-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
