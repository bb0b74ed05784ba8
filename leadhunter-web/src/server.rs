//! JSON API server for LeadHunter
//!
//! Wires the lead store and search adapter chosen by configuration into the
//! router and serves it until Ctrl-C.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use leadhunter_core::storage::open_store;
use leadhunter_core::{LeadHunterConfig, LeadStore, StorageError};
use leadhunter_search::{LeadSearchAdapter, LeadSource, SearchOrchestrator};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    api_catalog, api_health, api_leads, api_search, download_csv, download_excel,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SearchOrchestrator>,
    pub store: Arc<dyn LeadStore>,
}

impl AppState {
    pub fn new(source: Arc<dyn LeadSource>, store: Arc<dyn LeadStore>) -> Self {
        Self {
            orchestrator: Arc::new(SearchOrchestrator::new(source, store.clone())),
            store,
        }
    }
}

/// Errors that stop the server from starting or serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the API router. When `static_dir` is set, unmatched paths are
/// served from it.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api/search", post(api_search))
        .route("/api/download/csv", post(download_csv))
        .route("/api/download/excel", post(download_excel))
        .route("/api/leads", get(api_leads))
        .route("/api/catalog", get(api_catalog))
        .route("/api/health", get(api_health));

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Opens the configured store, binds the listener and serves until Ctrl-C.
///
/// # Errors
/// - `ServerError::Storage` - Database could not be opened or migrated
/// - `ServerError::Bind` - Address already in use or not permitted
/// - `ServerError::Io` - Serving failed
pub async fn run_server(config: LeadHunterConfig) -> Result<(), ServerError> {
    let store = open_store(&config.storage).await?;
    let adapter = LeadSearchAdapter::from_config(&config.search);
    let state = AppState::new(Arc::new(adapter), store);

    let app = build_router(state, config.server.static_dir.as_deref());

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

    if let Some(dir) = &config.server.static_dir {
        tracing::info!("Serving client files from {}", dir.display());
    }
    tracing::info!("LeadHunter server running on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
