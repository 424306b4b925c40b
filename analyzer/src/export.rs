//! Plain-text and PDF rendering of feedback for download.

use crate::types::{FeedbackResponse, FeedbackSection};
use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::fmt::Write;

/// Failures while rendering a download document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to render PDF: {0}")]
    Pdf(#[from] lopdf::Error),
}

// A4 in points. Courier is monospaced at 0.6 em, so 10 pt body text fits
// `WRAP_COLUMNS` characters between the margins.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;
const LEADING: i64 = 14;
const TITLE_SIZE: i64 = 16;
const HEADING_SIZE: i64 = 12;
const BODY_SIZE: i64 = 10;
const WRAP_COLUMNS: usize = 80;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;

const PDF_TITLE: &str = "WriteWise – Analyseergebnis";

fn export_heading(section: FeedbackSection) -> &'static str {
    match section {
        FeedbackSection::Sprache => "SPRACHLICHES FEEDBACK:",
        FeedbackSection::Struktur => "STRUKTUR-FEEDBACK:",
        FeedbackSection::Argumentation => "ARGUMENTATION:",
        FeedbackSection::Zusammenfassung => "ZUSAMMENFASSUNG:",
    }
}

/// Renders feedback as a text document.
///
/// The three list categories are written as `- item` bullets; the summary is
/// written as prose. Empty categories keep their heading.
pub fn render_txt(feedback: &FeedbackResponse, analyzed_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("WriteWise – Feedback\n");
    let _ = writeln!(out, "Analysezeitpunkt: {}\n", analyzed_at.to_rfc3339());

    for section in [
        FeedbackSection::Sprache,
        FeedbackSection::Struktur,
        FeedbackSection::Argumentation,
    ] {
        let _ = writeln!(out, "{}", export_heading(section));
        for item in feedback.items(section) {
            let _ = writeln!(out, "- {item}");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{}", export_heading(FeedbackSection::Zusammenfassung));
    out.push_str(feedback.zusammenfassung.trim());
    out.push('\n');
    out
}

enum PdfLine {
    Title(String),
    Heading(String),
    Body(String),
    Blank,
}

/// Renders feedback as a PDF document.
///
/// Same content as [`render_txt`]: a title, the analysis time, then each
/// category with its label as heading. Long lines are wrapped and the document
/// grows as many A4 pages as it needs.
pub fn render_pdf(
    feedback: &FeedbackResponse,
    analyzed_at: DateTime<Utc>,
) -> Result<Vec<u8>, ExportError> {
    let lines = pdf_lines(feedback, analyzed_at);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular = doc.add_object(courier("Courier"));
    let bold = doc.add_object(courier("Courier-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in lines.chunks(LINES_PER_PAGE) {
        let content = Content {
            operations: page_operations(page),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(lopdf::Error::from)?;
    Ok(bytes)
}

fn courier(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn pdf_lines(feedback: &FeedbackResponse, analyzed_at: DateTime<Utc>) -> Vec<PdfLine> {
    let mut lines = vec![
        PdfLine::Title(PDF_TITLE.to_string()),
        PdfLine::Body(format!("Analysezeitpunkt: {}", analyzed_at.to_rfc3339())),
        PdfLine::Blank,
    ];

    for section in [
        FeedbackSection::Sprache,
        FeedbackSection::Struktur,
        FeedbackSection::Argumentation,
    ] {
        lines.push(PdfLine::Heading(section.label().to_string()));
        for item in feedback.items(section) {
            lines.extend(
                wrap(&format!("- {item}"), WRAP_COLUMNS, "  ")
                    .into_iter()
                    .map(PdfLine::Body),
            );
        }
        lines.push(PdfLine::Blank);
    }

    lines.push(PdfLine::Heading(
        FeedbackSection::Zusammenfassung.label().to_string(),
    ));
    for paragraph in feedback.zusammenfassung.lines() {
        lines.extend(wrap(paragraph, WRAP_COLUMNS, "").into_iter().map(PdfLine::Body));
    }
    lines
}

fn page_operations(lines: &[PdfLine]) -> Vec<Operation> {
    let mut operations = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in lines {
        let (font, size, text) = match line {
            PdfLine::Title(text) => ("F2", TITLE_SIZE, text),
            PdfLine::Heading(text) => ("F2", HEADING_SIZE, text),
            PdfLine::Body(text) => ("F1", BODY_SIZE, text),
            PdfLine::Blank => {
                y -= LEADING;
                continue;
            }
        };
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), size.into()]),
            Operation::new("Td", vec![MARGIN.into(), y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(win_ansi(text), StringFormat::Hexadecimal)],
            ),
            Operation::new("ET", vec![]),
        ]);
        y -= LEADING;
    }
    operations
}

/// Greedy word wrap. Continuation lines start with `indent`; a single word
/// longer than `width` stays on its own line.
fn wrap(text: &str, width: usize, indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut has_words = false;

    for word in text.split_whitespace() {
        let needed = current.chars().count() + 1 + word.chars().count();
        if has_words && needed > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(indent);
            has_words = false;
        }
        if has_words {
            current.push(' ');
        }
        current.push_str(word);
        has_words = true;
    }
    if has_words {
        lines.push(current);
    }
    lines
}

/// Encodes text for the standard 14 fonts with `WinAnsiEncoding`.
///
/// Latin-1 maps one to one; the typographic characters a model tends to use
/// are mapped to their 0x80..0x9F codes. Anything else becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}
