//! yta-server library - Yomitan audio lookup service
//!
//! Looks up audio clips for a (term, reading) pair in the catalog, labels
//! each candidate with why it matched, and returns them in the order a
//! client should try them.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod lookup;

use lookup::store::AudioStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog backend
    pub store: Arc<dyn AudioStore>,
    /// Base URL for clip URLs in Yomitan audio source lists
    pub media_base_url: Option<String>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn AudioStore>, media_base_url: Option<String>) -> Self {
        Self {
            store,
            media_base_url,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    // Lookups are read-only and requested from browser extensions
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET]);

    let api = Router::new()
        .route("/api/audio", get(api::get_audio))
        .route("/api/audio/list", get(api::get_audio_source_list))
        .route("/api/buildinfo", get(api::get_build_info));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
