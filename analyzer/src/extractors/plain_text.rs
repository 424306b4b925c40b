use crate::error::AnalyzerError;
use crate::traits::extractor::TextExtractor;

/// Extractor for `.txt` uploads and inline text.
///
/// Decodes UTF-8 (lossily, so stray bytes never reject a submission), drops a
/// leading byte-order mark and normalizes line endings to `\n`. The text is
/// otherwise passed through untouched.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, AnalyzerError> {
        Ok(normalize_text(&String::from_utf8_lossy(bytes)))
    }
}

/// Encoding normalization shared by file and inline submissions.
pub fn normalize_text(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
