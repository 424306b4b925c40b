//! # Feedback Formatter
//!
//! Splits the raw model answer into the four [`FeedbackSection`]s using the
//! headings requested by [`crate::prompt`].
//!
//! A heading line is recognized leniently: leading `#` characters, surrounding
//! `*` emphasis, a list number, whitespace and a trailing `:` are ignored, and
//! matching is case-insensitive (`## **Sprache:**` and `### 1. Sprache` count).
//! Models do not always follow the template, so missing sections become empty
//! strings. Only an answer without a single recognizable heading is rejected.

use crate::error::AnalyzerError;
use crate::types::{FeedbackResponse, FeedbackSection};
use tracing::warn;

/// Maximum number of characters of raw output quoted in an error for the logs.
const EXCERPT_CHARS: usize = 200;

/// Parses raw model output into a [`FeedbackResponse`].
///
/// Content before the first heading is dropped. Blank lines around a section
/// body are dropped; indentation inside it is kept. A section whose heading
/// appears twice gets both bodies joined by a blank line.
/// A body cut off mid-way (truncated output) is kept as far as it goes.
pub fn parse_feedback(raw: &str) -> Result<FeedbackResponse, AnalyzerError> {
    let mut response = FeedbackResponse::default();
    let mut current: Option<FeedbackSection> = None;
    let mut body: Vec<&str> = Vec::new();
    let mut found_any = false;

    for line in raw.lines() {
        if let Some(section) = heading_of(line) {
            if let Some(open) = current.take() {
                append(&mut response, open, &body);
            }
            body.clear();
            current = Some(section);
            found_any = true;
        } else if current.is_some() {
            body.push(line);
        }
    }
    if let Some(open) = current {
        append(&mut response, open, &body);
    }

    if !found_any {
        let excerpt: String = raw.chars().take(EXCERPT_CHARS).collect();
        return Err(AnalyzerError::UnparsableResponse(format!(
            "no section headings in model output: {excerpt:?}"
        )));
    }

    let missing = response.missing_sections();
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|s| s.label()).collect();
        warn!(missing = ?labels, "model output is missing feedback sections");
    }

    Ok(response)
}

fn heading_of(line: &str) -> Option<FeedbackSection> {
    let trimmed = line.trim();
    if !trimmed.starts_with('#') && !trimmed.starts_with('*') {
        // A bare label line ("Sprache:") is accepted as well, but only when it
        // is the whole line.
        return FeedbackSection::from_title(strip_decoration(trimmed));
    }
    FeedbackSection::from_title(strip_decoration(trimmed.trim_start_matches('#')))
}

fn strip_decoration(text: &str) -> &str {
    let text = text.trim().trim_matches('*').trim();
    let text = text.strip_suffix(':').unwrap_or(text);
    let text = text.trim_matches('*').trim();
    strip_numbering(text).trim_matches('*').trim()
}

/// Drops a leading `1.` or `1)` list number.
fn strip_numbering(text: &str) -> &str {
    let rest = text.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == text.len() {
        return text;
    }
    match rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
        Some(title) => title.trim_start(),
        None => text,
    }
}

fn append(response: &mut FeedbackResponse, section: FeedbackSection, body: &[&str]) {
    let Some(start) = body.iter().position(|line| !line.trim().is_empty()) else {
        return;
    };
    let end = body
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(body.len(), |last| last + 1);
    let text = body[start..end].join("\n");

    let slot = response.section_mut(section);
    if !slot.is_empty() {
        slot.push_str("\n\n");
    }
    slot.push_str(&text);
}
