//! Analyzer Error Types
//!
//! This module defines the [`AnalyzerError`] enum, which covers every way a single
//! feedback request can fail: unreadable input, an unreachable or misbehaving model
//! endpoint, and model output that cannot be split into feedback sections.
//!
//! All variants are terminal for the current request. The `String` payloads carry
//! internal detail for logs only; callers that talk to end users should show
//! [`AnalyzerError::user_message`] instead of the `Display` output.
//!
//! # Example
//!
//! ```rust
//! use analyzer::error::{AnalyzerError, ErrorKind};
//!
//! let err = AnalyzerError::EmptySubmission;
//! assert_eq!(err.kind(), ErrorKind::EmptySubmission);
//! assert!(!err.user_message().is_empty());
//! ```

use serde::Serialize;

/// Represents all error types that can occur in the analysis pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// The uploaded file type is not one of `.txt`, `.pdf`, `.docx`.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    /// The file type is supported but no text could be obtained from it.
    #[error("unsupported document: {0}")]
    UnsupportedDocument(String),
    /// Nothing but whitespace was submitted.
    #[error("empty submission")]
    EmptySubmission,
    /// The extracted text exceeds the configured character limit.
    #[error("submission too long: {chars} characters (limit {limit})")]
    SubmissionTooLong { chars: usize, limit: usize },
    /// The model endpoint could not be reached.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
    /// The model endpoint did not answer before the deadline.
    #[error("model timed out after {0:?}")]
    ModelTimeout(std::time::Duration),
    /// The model endpoint answered with a failure status or an unusable body.
    #[error("model error: {0}")]
    ModelError(String),
    /// The model answer contains none of the expected section headings.
    #[error("unparsable response: {0}")]
    UnparsableResponse(String),
}

/// Stable, serializable name of a failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    UnsupportedFormat,
    UnsupportedDocument,
    EmptySubmission,
    SubmissionTooLong,
    ModelUnavailable,
    ModelTimeout,
    ModelError,
    UnparsableResponse,
}

impl AnalyzerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyzerError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            AnalyzerError::UnsupportedDocument(_) => ErrorKind::UnsupportedDocument,
            AnalyzerError::EmptySubmission => ErrorKind::EmptySubmission,
            AnalyzerError::SubmissionTooLong { .. } => ErrorKind::SubmissionTooLong,
            AnalyzerError::ModelUnavailable(_) => ErrorKind::ModelUnavailable,
            AnalyzerError::ModelTimeout(_) => ErrorKind::ModelTimeout,
            AnalyzerError::ModelError(_) => ErrorKind::ModelError,
            AnalyzerError::UnparsableResponse(_) => ErrorKind::UnparsableResponse,
        }
    }

    /// A fixed German message that is safe to show to end users.
    pub fn user_message(&self) -> String {
        match self {
            AnalyzerError::UnsupportedFormat(_) => "Nicht unterstütztes Dateiformat. \
                 Bitte laden Sie eine .txt-, .pdf- oder .docx-Datei hoch."
                .into(),
            AnalyzerError::UnsupportedDocument(_) => "Das Dokument enthält keinen auslesbaren \
                 Text (zum Beispiel ein eingescanntes PDF)."
                .into(),
            AnalyzerError::EmptySubmission => {
                "Bitte geben Sie einen Text ein oder laden Sie eine Datei hoch.".into()
            }
            AnalyzerError::SubmissionTooLong { limit, .. } => {
                format!("Der Text ist zu lang (maximal {limit} Zeichen).")
            }
            AnalyzerError::ModelUnavailable(_) => "Der Feedback-Dienst ist derzeit nicht \
                 erreichbar. Bitte versuchen Sie es später erneut."
                .into(),
            AnalyzerError::ModelTimeout(_) => "Der Feedback-Dienst hat nicht rechtzeitig \
                 geantwortet. Bitte versuchen Sie es später erneut."
                .into(),
            AnalyzerError::ModelError(_) => "Der Feedback-Dienst hat einen Fehler gemeldet.".into(),
            AnalyzerError::UnparsableResponse(_) => {
                "Das Feedback konnte nicht gelesen werden. Bitte versuchen Sie es erneut.".into()
            }
        }
    }
}
