use crate::error::AnalyzerError;
use crate::traits::extractor::TextExtractor;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Path of the main document part inside a `.docx` container.
const DOCUMENT_PART: &str = "word/document.xml";

/// Extractor for Word `.docx` uploads.
///
/// Reads `word/document.xml` from the OOXML zip container and returns the
/// non-blank paragraphs in document order, one per line. Runs inside a
/// paragraph are concatenated; inside a run `w:tab` becomes a tab and `w:br` a
/// line break. Paragraph properties (tab stops and the like) produce no text.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, AnalyzerError> {
        let xml = read_document_part(bytes)?;
        let paragraphs = paragraphs(&xml).map_err(|e| {
            AnalyzerError::UnsupportedDocument(format!("malformed {DOCUMENT_PART}: {e}"))
        })?;

        Ok(paragraphs
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

fn read_document_part(bytes: &[u8]) -> Result<String, AnalyzerError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AnalyzerError::UnsupportedDocument(format!("not a zip container: {e}")))?;
    let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
        AnalyzerError::UnsupportedDocument(format!("missing {DOCUMENT_PART}: {e}"))
    })?;

    let mut xml = String::new();
    part.read_to_string(&mut xml).map_err(|e| {
        AnalyzerError::UnsupportedDocument(format!("unreadable {DOCUMENT_PART}: {e}"))
    })?;
    Ok(xml)
}

/// Collects the text of every `w:p` element.
///
/// Paragraphs can nest (text boxes), so open paragraphs are kept on a stack and
/// each one is emitted when it closes. Tabs and breaks count only inside a
/// `w:r` run; the same element names also appear in paragraph properties.
fn paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<String> = Vec::new();
    let mut done = Vec::new();
    let mut in_text = false;
    let mut run_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:r" => run_depth += 1,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) if run_depth > 0 => {
                if let Some(current) = open.last_mut() {
                    match e.name().as_ref() {
                        b"w:tab" => current.push('\t'),
                        b"w:br" | b"w:cr" => current.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(t) if in_text => {
                if let Some(current) = open.last_mut() {
                    current.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:p" => {
                    if let Some(paragraph) = open.pop() {
                        done.push(paragraph);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(done)
}
