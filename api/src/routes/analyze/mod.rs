//! Analysis routes.
//!
//! Routes:
//! - `POST /analyze` → Extract, prompt, call the model and return the four feedback sections.

use crate::state::AppState;
use axum::{Router, routing::post};

pub mod post;

pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/", post(post::analyze))
}
