//! Helpers shared by route handlers.

use crate::response::{ApiResponse, ErrorData};
use analyzer::{AnalyzerError, ErrorKind};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

/// HTTP status for each failure kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::UnsupportedFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ErrorKind::UnsupportedDocument => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::EmptySubmission => StatusCode::BAD_REQUEST,
        ErrorKind::SubmissionTooLong => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::ModelTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::ModelError | ErrorKind::UnparsableResponse => StatusCode::BAD_GATEWAY,
    }
}

/// Converts a pipeline error into the JSON error envelope.
///
/// The internal detail of the error goes to the log only; the client receives
/// the failure kind and a fixed user-facing message.
pub fn analyzer_error_response(err: &AnalyzerError) -> Response {
    let kind = err.kind();
    let status = status_for(kind);

    if status.is_server_error() {
        error!(?kind, error = %err, "analysis failed upstream");
    } else {
        warn!(?kind, error = %err, "submission rejected");
    }

    (
        status,
        Json(ApiResponse::failure(kind, err.user_message())),
    )
        .into_response()
}

/// An error envelope without a failure kind, for requests that never reached
/// the pipeline.
pub fn error_message_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<ErrorData>::error(message))).into_response()
}
