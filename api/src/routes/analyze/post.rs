use crate::response::ApiResponse;
use crate::routes::common::{analyzer_error_response, error_message_response};
use crate::state::AppState;
use analyzer::{AnalyzerError, Submission};
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

/// An uploaded file taken from the form.
struct Upload {
    filename: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// POST /api/analyze
///
/// Analyze inline text or an uploaded document and return feedback in four
/// categories.
///
/// ### Request Body (Multipart Form Data)
/// - `file` (file, optional): A `.txt`, `.pdf` or `.docx` document.
/// - `text` (string, optional): Text typed directly into the form.
///
/// A non-empty `file` takes precedence over `text`. At least one must be given.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "message": "Feedback erstellt",
///   "data": {
///     "feedback": {
///       "sprache": "- ...",
///       "struktur": "- ...",
///       "argumentation": "- ...",
///       "zusammenfassung": "..."
///     },
///     "ai_used": true,
///     "text_length": 46,
///     "source": "text",
///     "analyzed_at": "2025-01-01T12:00:00Z"
///   }
/// }
/// ```
///
/// - `400 Bad Request` (`EmptySubmission`, malformed form data)
/// - `413 Payload Too Large` (`SubmissionTooLong`, upload over the size limit)
/// - `415 Unsupported Media Type` (`UnsupportedFormat`)
/// - `422 Unprocessable Entity` (`UnsupportedDocument`)
/// - `502 Bad Gateway` (`ModelError`, `UnparsableResponse`)
/// - `503 Service Unavailable` (`ModelUnavailable`)
/// - `504 Gateway Timeout` (`ModelTimeout`)
///
/// ```json
/// {
///   "success": false,
///   "data": { "kind": "UnsupportedDocument" },
///   "message": "Das Dokument enthält keinen auslesbaren Text ..."
/// }
/// ```
pub async fn analyze(State(app_state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut text: Option<String> = None;
    let mut upload: Option<Upload> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return multipart_failure(e),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "text" => match field.text().await {
                Ok(value) => text = Some(value),
                Err(e) => return multipart_failure(e),
            },
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => return multipart_failure(e),
                };
                // Browsers send an empty, unnamed part for an untouched file input.
                if !filename.is_empty() && !bytes.is_empty() {
                    upload = Some(Upload {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => continue,
        }
    }

    let submission = match (upload, text) {
        (Some(upload), _) => Submission::file(upload.filename, upload.content_type, upload.bytes),
        (None, Some(text)) => Submission::text(text),
        (None, None) => return analyzer_error_response(&AnalyzerError::EmptySubmission),
    };

    match app_state.pipeline().analyze(submission).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ApiResponse::success(outcome, "Feedback erstellt")),
        )
            .into_response(),
        Err(e) => analyzer_error_response(&e),
    }
}

fn multipart_failure(e: MultipartError) -> Response {
    let status = e.status();
    warn!(%status, error = %e, "could not read multipart body");
    let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "Die Datei überschreitet die maximal zulässige Größe."
    } else {
        "Ungültige Formulardaten."
    };
    error_message_response(status, message)
}
