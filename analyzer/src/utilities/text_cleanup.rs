//! Regex-based cleanup passes applied to extracted text.

use once_cell::sync::Lazy;
use regex::Regex;

static HYPHENATED_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"-\n").unwrap());
static ANY_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static INLINE_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());
static SPACE_BEFORE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+([.,;:!?])").unwrap());
static BULLET_GLYPHS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[■▪•]+").unwrap());

/// Flattens the text of one PDF page to a single line.
///
/// Words split across lines by hyphenation are rejoined, then every whitespace
/// run (including newlines) becomes a single space.
pub fn flatten_page_text(text: &str) -> String {
    let joined = HYPHENATED_BREAK.replace_all(text, "");
    ANY_WHITESPACE_RUN
        .replace_all(&joined, " ")
        .trim()
        .to_string()
}

/// Tidies text before it is handed to the model.
///
/// Line structure is kept. Within lines, runs of spaces and tabs collapse,
/// whitespace before punctuation is dropped and bullet glyphs become `-`.
pub fn clean_for_analysis(text: &str) -> String {
    let text = INLINE_WHITESPACE_RUN.replace_all(text, " ");
    let text = SPACE_BEFORE_PUNCTUATION.replace_all(&text, "$1");
    let text = BULLET_GLYPHS.replace_all(&text, "-");
    text.trim().to_string()
}
