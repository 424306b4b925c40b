//! Test doubles and in-memory document fixtures.
//!
//! Used by the unit tests of this crate and by the api integration tests.

use crate::error::AnalyzerError;
use crate::traits::model_client::ModelClient;
use crate::types::{FeedbackRequest, FeedbackSection};
use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::io::{Cursor, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Section bodies of [`canned_feedback_response`].
pub const CANNED_SPRACHE: &str =
    "- Der Stil ist sachlich.\n- Der Satzbau könnte abwechslungsreicher sein.";
pub const CANNED_STRUKTUR: &str = "- Die Aussage steht klar am Anfang.";
pub const CANNED_ARGUMENTATION: &str = "- Die These braucht eine Begründung.";
pub const CANNED_ZUSAMMENFASSUNG: &str = "Ein guter Einstieg, der ausgebaut werden sollte.";

/// A well-formed four-section answer, as a compliant model would send it.
pub fn canned_feedback_response() -> String {
    [
        (FeedbackSection::Sprache, CANNED_SPRACHE),
        (FeedbackSection::Struktur, CANNED_STRUKTUR),
        (FeedbackSection::Argumentation, CANNED_ARGUMENTATION),
        (FeedbackSection::Zusammenfassung, CANNED_ZUSAMMENFASSUNG),
    ]
    .iter()
    .map(|(section, body)| format!("{}\n{}\n", section.heading(), body))
    .collect::<Vec<_>>()
    .join("\n")
}

type ErrorFactory = Box<dyn Fn() -> AnalyzerError + Send + Sync>;

/// Model client that answers from memory and counts its calls.
pub struct StubModelClient {
    reply: Result<String, ErrorFactory>,
    calls: AtomicUsize,
    last_request: Mutex<Option<FeedbackRequest>>,
}

impl StubModelClient {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(error: impl Fn() -> AnalyzerError + Send + Sync + 'static) -> Self {
        Self {
            reply: Err(Box::new(error)),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<FeedbackRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl ModelClient for StubModelClient {
    async fn complete(&self, request: &FeedbackRequest) -> Result<String, AnalyzerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}

/// Builds a PDF with one page per entry. `Some(text)` pages carry a text layer
/// (ASCII only, standard Courier font); `None` pages have an empty content stream,
/// like a scanned image page.
pub fn pdf_fixture(pages: &[Option<&str>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let operations = match page {
            Some(text) => vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
            None => vec![],
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("write pdf fixture");
    bytes
}

/// Builds a `.docx` container with one simple paragraph per entry.
pub fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| {
            format!(
                "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
                quick_xml::escape::escape(*p)
            )
        })
        .collect();

    docx_from_document_xml(&format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
<w:body>{body}</w:body></w:document>"
    ))
}

/// Wraps a raw `word/document.xml` into a minimal `.docx` container.
pub fn docx_from_document_xml(document_xml: &str) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("[Content_Types].xml", SimpleFileOptions::default())
        .expect("start content types");
    writer
        .write_all(
            b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Override PartName=\"/word/document.xml\" \
ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
</Types>",
        )
        .expect("write content types");

    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .expect("start document part");
    writer
        .write_all(document_xml.as_bytes())
        .expect("write document part");

    writer.finish().expect("finish docx fixture").into_inner()
}
