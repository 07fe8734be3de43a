//! HTTP surface of the service.
//!
//! Thin handlers over the pipeline stages. Requests deserialize into typed
//! structs and pipeline errors map onto status codes in [`error`]; every
//! response body is JSON except the CSV export.

mod error;
mod routes;

pub use error::AppError;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::ArtifactStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: ArtifactStore, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

/// Assemble the router. Kept separate from serving so tests can drive the
/// whole surface with oneshot requests.
pub fn app(state: AppState) -> Router {
    let max_upload = state.config.store.max_upload_bytes;
    Router::new()
        .route("/health", get(routes::health))
        .route("/download", post(routes::download_genome))
        .route("/upload", post(routes::upload_sequences))
        .route("/analyze/virulence", get(routes::analyze_virulence))
        .route("/analyze/resistance", get(routes::analyze_resistance))
        .route("/analyze/nucmer", post(routes::analyze_nucmer))
        .route("/analyze/alignment", post(routes::analyze_alignment))
        .route("/download/csv", get(routes::download_csv))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
