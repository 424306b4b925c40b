use once_cell::sync::Lazy;
use regex::Regex;

static CHAPTER_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)*)\s+(.+)$").unwrap());

/// Marker prefix written by the PDF extractor in front of each page.
pub const PAGE_MARKER_PREFIX: &str = "[SEITE ";

/// Chapter name used before the first numbered heading.
pub const UNKNOWN_CHAPTER: &str = "Unbekannt";

/// Tags every line with the chapter it belongs to.
///
/// A line such as `2.1 Methodik` opens a chapter and is replaced by
/// `[KAPITEL: 2.1 Methodik]`. Other lines are prefixed with the current chapter
/// marker. Blank lines are dropped and lines that already start with a page
/// marker are kept verbatim.
pub fn annotate_chapters(text: &str) -> String {
    let mut current = UNKNOWN_CHAPTER.to_string();
    let mut output = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with(PAGE_MARKER_PREFIX) {
            output.push(line.to_string());
            continue;
        }
        match CHAPTER_HEADING.captures(line) {
            Some(caps) => {
                current = format!("{} {}", &caps[1], &caps[2]);
                output.push(format!("[KAPITEL: {current}]"));
            }
            None => output.push(format!("[KAPITEL: {current}] {line}")),
        }
    }

    output.join("\n")
}
