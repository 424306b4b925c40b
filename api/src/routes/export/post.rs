use crate::routes::common::error_message_response;
use analyzer::FeedbackResponse;
use analyzer::export::{render_pdf, render_txt};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{error, warn};

pub const TXT_FILENAME: &str = "writewise_feedback.txt";
pub const PDF_FILENAME: &str = "writewise_feedback.pdf";

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub feedback: FeedbackResponse,
    pub analyzed_at: Option<DateTime<Utc>>,
}

/// POST /api/export/txt
///
/// Renders a previously returned feedback result as a plain-text download.
///
/// ### Request Body (JSON)
/// ```json
/// {
///   "feedback": {
///     "sprache": "- ...",
///     "struktur": "- ...",
///     "argumentation": "- ...",
///     "zusammenfassung": "..."
///   },
///   "analyzed_at": "2025-01-01T12:00:00Z"
/// }
/// ```
/// `analyzed_at` is optional and defaults to the current time.
///
/// ### Responses
/// - `200 OK` with `Content-Type: text/plain; charset=utf-8` and an attachment
///   `Content-Disposition` header.
/// - `400 Bad Request` when the body is not a valid feedback object.
pub async fn export_txt(payload: Result<Json<ExportRequest>, JsonRejection>) -> Response {
    let req = match parse_request(payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let body = render_txt(&req.feedback, req.analyzed_at.unwrap_or_else(Utc::now));
    attachment("text/plain; charset=utf-8", TXT_FILENAME, body.into_bytes())
}

/// POST /api/export/pdf
///
/// Renders a previously returned feedback result as a PDF download with a
/// title, the four category headings and their items.
///
/// ### Request Body (JSON)
/// Same as `POST /api/export/txt`.
///
/// ### Responses
/// - `200 OK` with `Content-Type: application/pdf` and an attachment
///   `Content-Disposition` header.
/// - `400 Bad Request` when the body is not a valid feedback object.
/// - `500 Internal Server Error` when the document cannot be rendered.
pub async fn export_pdf(payload: Result<Json<ExportRequest>, JsonRejection>) -> Response {
    let req = match parse_request(payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    match render_pdf(&req.feedback, req.analyzed_at.unwrap_or_else(Utc::now)) {
        Ok(bytes) => attachment("application/pdf", PDF_FILENAME, bytes),
        Err(e) => {
            error!(error = %e, "PDF export failed");
            error_message_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Das PDF konnte nicht erstellt werden.",
            )
        }
    }
}

fn parse_request(
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<ExportRequest, Response> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(e) => {
            warn!(error = %e, "invalid export payload");
            Err(error_message_response(StatusCode::BAD_REQUEST, "Ungültige Feedback-Daten."))
        }
    }
}

fn attachment(content_type: &'static str, filename: &str, body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}
