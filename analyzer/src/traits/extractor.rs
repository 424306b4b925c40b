use crate::error::AnalyzerError;

/// TextExtractor is a strategy trait for turning the raw bytes of one document
/// format into plain text.
///
/// Implementations only convert. Blank-result and length checks happen once, in
/// [`crate::extractors::extract_submission`], for every format alike.
pub trait TextExtractor: Send + Sync {
    /// Extract the text content of `bytes`.
    ///
    /// Returns [`AnalyzerError::UnsupportedDocument`] when the bytes are not a
    /// readable document of this format.
    fn extract(&self, bytes: &[u8]) -> Result<String, AnalyzerError>;
}
