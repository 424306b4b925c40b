//! HTTP route entry point.
//!
//! Route groups under `/api`:
//! - `/health` → Health check endpoint
//! - `/analyze` → Submit text or a document for feedback
//! - `/export` → Download a feedback result
//!
//! `GET /` serves the submission page outside the `/api` namespace.

use crate::middleware::log_request;
use crate::routes::{analyze::analyze_routes, export::export_routes, health::health_routes};
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn,
    routing::get,
};
use tower_http::cors::CorsLayer;

pub mod analyze;
pub mod common;
pub mod export;
pub mod health;
pub mod index;

/// Builds the router for all `/api` endpoints.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/analyze", analyze_routes())
        .nest("/export", export_routes())
        .with_state(app_state)
}

/// Builds the complete application: the page, the API and the shared layers.
///
/// The request body limit applies to every route and is taken from the state,
/// so an oversized upload is rejected before the handler buffers it.
pub fn app(app_state: AppState) -> Router {
    let body_limit = app_state.max_upload_bytes();
    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    Router::new()
        .route("/", get(index::index))
        .nest("/api", routes(app_state))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn(log_request))
        .layer(cors)
}
