//! # Document Extractors
//!
//! Converts a [`Submission`] into [`ExtractedText`]. One [`TextExtractor`] exists
//! per supported format:
//!
//! - [`plain_text`]: `.txt` files and inline text, decoded as UTF-8.
//! - [`pdf`]: `.pdf` files, page by page with `[SEITE n]` markers.
//! - [`docx`]: Word `.docx` files, paragraph by paragraph.
//!
//! Checks common to every format (blank result, character limit) are applied
//! here after the format-specific conversion.

pub mod docx;
pub mod pdf;
pub mod plain_text;

use crate::error::AnalyzerError;
use crate::traits::extractor::TextExtractor;
use crate::types::{DocumentFormat, ExtractedText, Submission, TextSource};
use docx::DocxExtractor;
use pdf::PdfExtractor;
use plain_text::{PlainTextExtractor, normalize_text};

/// Returns the extractor responsible for `format`.
pub fn extractor_for(format: DocumentFormat) -> Box<dyn TextExtractor> {
    match format {
        DocumentFormat::PlainText => Box::new(PlainTextExtractor::new()),
        DocumentFormat::Pdf => Box::new(PdfExtractor::new()),
        DocumentFormat::Docx => Box::new(DocxExtractor::new()),
    }
}

/// Produces the normalized text of a submission.
///
/// # Errors
/// - [`AnalyzerError::UnsupportedFormat`] for file types other than txt/pdf/docx.
/// - [`AnalyzerError::UnsupportedDocument`] when a pdf/docx holds no readable text.
/// - [`AnalyzerError::EmptySubmission`] when the result is blank.
/// - [`AnalyzerError::SubmissionTooLong`] when the result exceeds `max_chars`.
pub fn extract_submission(
    submission: &Submission,
    max_chars: usize,
) -> Result<ExtractedText, AnalyzerError> {
    let (text, source) = match submission {
        Submission::Text(text) => (normalize_text(text), TextSource::Inline),
        Submission::File {
            filename,
            content_type,
            bytes,
        } => {
            let format = DocumentFormat::detect(filename, content_type.as_deref())?;
            if bytes.is_empty() {
                return Err(AnalyzerError::EmptySubmission);
            }
            let text = extractor_for(format).extract(bytes)?;
            (text, TextSource::File(format))
        }
    };

    let extracted = ExtractedText::new(text, source)?;

    let chars = extracted.char_count();
    if chars > max_chars {
        return Err(AnalyzerError::SubmissionTooLong {
            chars,
            limit: max_chars,
        });
    }

    Ok(extracted)
}
