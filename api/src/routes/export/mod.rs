//! Export routes.
//!
//! Routes:
//! - `POST /export/txt` → Render a feedback result as a downloadable plain-text file.
//! - `POST /export/pdf` → Render a feedback result as a downloadable PDF.

use crate::state::AppState;
use axum::{Router, routing::post};

pub mod post;

pub fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/txt", post(post::export_txt))
        .route("/pdf", post(post::export_pdf))
}
