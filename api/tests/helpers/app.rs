use analyzer::PipelineOptions;
use analyzer::test_helpers::StubModelClient;
use api::routes::app;
use api::state::AppState;
use axum::{body::Body, http::Request, response::Response};
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;
use tower::ServiceExt;
use tower::util::BoxCloneService;
use util::config::DEFAULT_MAX_UPLOAD_BYTES;

pub type TestApp = BoxCloneService<Request<Body>, Response, Infallible>;

/// Builds the full application around `stub` with the default limits.
pub fn make_test_app(stub: Arc<StubModelClient>) -> TestApp {
    make_test_app_with_limits(stub, PipelineOptions::default(), DEFAULT_MAX_UPLOAD_BYTES)
}

pub fn make_test_app_with_limits(
    stub: Arc<StubModelClient>,
    options: PipelineOptions,
    max_upload_bytes: usize,
) -> TestApp {
    let state = AppState::new(stub, options, max_upload_bytes);
    app(state).into_service().boxed_clone()
}

/// Reads a JSON response body.
pub async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
