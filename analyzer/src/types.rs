//! Core data types flowing through the analysis pipeline.
//!
//! A request moves through these types in order:
//! [`Submission`] → [`ExtractedText`] → [`FeedbackRequest`] → raw model text →
//! [`FeedbackResponse`]. None of them outlive the request that created them.

use crate::error::AnalyzerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// MIME type of `.docx` files.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// User-provided content: inline text or an uploaded file.
#[derive(Debug, Clone)]
pub enum Submission {
    Text(String),
    File {
        filename: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

impl Submission {
    pub fn text(text: impl Into<String>) -> Self {
        Submission::Text(text.into())
    }

    pub fn file(filename: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Submission::File {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Detects the format from the file extension, falling back to the declared
    /// MIME type when the name has no extension.
    pub fn detect(filename: &str, content_type: Option<&str>) -> Result<Self, AnalyzerError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("txt") => Ok(DocumentFormat::PlainText),
            Some("pdf") => Ok(DocumentFormat::Pdf),
            Some("docx") => Ok(DocumentFormat::Docx),
            Some(other) => Err(AnalyzerError::UnsupportedFormat(format!(".{other}"))),
            None => Self::from_mime(content_type.unwrap_or_default()),
        }
    }

    fn from_mime(content_type: &str) -> Result<Self, AnalyzerError> {
        // Strip parameters such as "; charset=utf-8".
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "text/plain" => Ok(DocumentFormat::PlainText),
            "application/pdf" => Ok(DocumentFormat::Pdf),
            DOCX_MIME => Ok(DocumentFormat::Docx),
            "" => Err(AnalyzerError::UnsupportedFormat("no extension or type".into())),
            other => Err(AnalyzerError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "txt",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

/// Where an [`ExtractedText`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Inline,
    File(DocumentFormat),
}

impl TextSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSource::Inline => "text",
            TextSource::File(format) => format.as_str(),
        }
    }
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TextSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Normalized text derived from a [`Submission`]. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    source: TextSource,
}

impl ExtractedText {
    pub fn new(text: String, source: TextSource) -> Result<Self, AnalyzerError> {
        if text.trim().is_empty() {
            return Err(AnalyzerError::EmptySubmission);
        }
        Ok(Self { text, source })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> TextSource {
        self.source
    }

    /// Length in characters, not bytes.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// The fixed instructions plus the prepared document, ready to send to a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    system: String,
    user: String,
}

impl FeedbackRequest {
    pub(crate) fn new(system: String, user: String) -> Self {
        Self { system, user }
    }

    /// Instruction text describing the four categories and the answer format.
    pub fn system(&self) -> &str {
        &self.system
    }

    /// The document text wrapped for the model.
    pub fn user(&self) -> &str {
        &self.user
    }
}

/// The four fixed feedback categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackSection {
    Sprache,
    Struktur,
    Argumentation,
    Zusammenfassung,
}

impl FeedbackSection {
    pub const ALL: [FeedbackSection; 4] = [
        FeedbackSection::Sprache,
        FeedbackSection::Struktur,
        FeedbackSection::Argumentation,
        FeedbackSection::Zusammenfassung,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackSection::Sprache => "Sprache",
            FeedbackSection::Struktur => "Struktur",
            FeedbackSection::Argumentation => "Argumentation",
            FeedbackSection::Zusammenfassung => "Zusammenfassung",
        }
    }

    /// The heading line the model is asked to emit before this section.
    pub fn heading(&self) -> String {
        format!("### {}", self.label())
    }

    /// Matches a normalized heading title, including common English aliases.
    pub fn from_title(title: &str) -> Option<Self> {
        match title.to_lowercase().as_str() {
            "sprache" | "language" => Some(FeedbackSection::Sprache),
            "struktur" | "structure" => Some(FeedbackSection::Struktur),
            "argumentation" => Some(FeedbackSection::Argumentation),
            "zusammenfassung" | "summary" => Some(FeedbackSection::Zusammenfassung),
            _ => None,
        }
    }
}

/// Structured feedback across the four categories. Missing sections are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    #[serde(default)]
    pub sprache: String,
    #[serde(default)]
    pub struktur: String,
    #[serde(default)]
    pub argumentation: String,
    #[serde(default)]
    pub zusammenfassung: String,
}

impl FeedbackResponse {
    pub fn section(&self, section: FeedbackSection) -> &str {
        match section {
            FeedbackSection::Sprache => &self.sprache,
            FeedbackSection::Struktur => &self.struktur,
            FeedbackSection::Argumentation => &self.argumentation,
            FeedbackSection::Zusammenfassung => &self.zusammenfassung,
        }
    }

    pub fn section_mut(&mut self, section: FeedbackSection) -> &mut String {
        match section {
            FeedbackSection::Sprache => &mut self.sprache,
            FeedbackSection::Struktur => &mut self.struktur,
            FeedbackSection::Argumentation => &mut self.argumentation,
            FeedbackSection::Zusammenfassung => &mut self.zusammenfassung,
        }
    }

    /// Sections the model left out.
    pub fn missing_sections(&self) -> Vec<FeedbackSection> {
        FeedbackSection::ALL
            .into_iter()
            .filter(|s| self.section(*s).trim().is_empty())
            .collect()
    }

    /// Splits a section into its bullet points.
    ///
    /// Lines starting with `-`, `*`, `•` or an `n.` enumeration open a new item;
    /// other non-empty lines continue the current one. A section without any
    /// bullets is returned as a single item.
    pub fn items(&self, section: FeedbackSection) -> Vec<String> {
        let mut items: Vec<String> = Vec::new();
        for line in self.section(section).lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match strip_bullet(line) {
                Some(rest) => items.push(rest.to_string()),
                None => match items.last_mut() {
                    Some(current) => {
                        current.push(' ');
                        current.push_str(line);
                    }
                    None => items.push(line.to_string()),
                },
            }
        }
        items
    }
}

fn strip_bullet(line: &str) -> Option<&str> {
    for marker in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest.trim());
        }
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(". ") {
            return Some(rest.trim());
        }
    }
    None
}
