use crate::error::AnalyzerError;
use crate::traits::extractor::TextExtractor;
use crate::utilities::text_cleanup::flatten_page_text;
use lopdf::Document;
use tracing::{debug, warn};

/// Extractor for `.pdf` uploads.
///
/// Each page with a text layer becomes one `[SEITE n] ...` line; pages are
/// separated by a blank line and kept in page order. Pages without text are
/// skipped. A document where no page has text (a scan) is rejected.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, AnalyzerError> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| AnalyzerError::UnsupportedDocument(format!("unreadable PDF: {e}")))?;

        if doc.is_encrypted() {
            return Err(AnalyzerError::UnsupportedDocument("encrypted PDF".into()));
        }

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let mut pages = Vec::with_capacity(page_numbers.len());

        for number in &page_numbers {
            match doc.extract_text(&[*number]) {
                Ok(raw) => {
                    let text = flatten_page_text(&raw);
                    if text.is_empty() {
                        debug!(page = number, "page has no text layer");
                    } else {
                        pages.push(format!("[SEITE {number}] {text}"));
                    }
                }
                Err(e) => warn!(page = number, error = %e, "failed to extract page text"),
            }
        }

        if pages.is_empty() {
            return Err(AnalyzerError::UnsupportedDocument(format!(
                "no extractable text on {} page(s)",
                page_numbers.len()
            )));
        }

        Ok(pages.join("\n\n"))
    }
}
