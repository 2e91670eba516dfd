//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The paper upload endpoint
//! - The file route for the local development fallback
//! - JSON error responses

pub mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use bestpapers_core::upload::UploadService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upload service with its storage backends already resolved.
    pub uploads: Arc<UploadService>,
}

impl AppState {
    /// Create state around an upload service.
    #[must_use]
    pub fn new(uploads: UploadService) -> Self {
        Self {
            uploads: Arc::new(uploads),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes(&state))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
