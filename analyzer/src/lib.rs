//! # Analyzer Library
//!
//! This crate provides the document-to-feedback pipeline behind WriteWise.
//! A student's text or uploaded document is turned into plain text, wrapped in a
//! fixed instruction prompt, sent to a language model, and the answer is split
//! into four feedback categories: Sprache, Struktur, Argumentation and
//! Zusammenfassung.
//!
//! ## Key Concepts
//! - **Extractors**: One strategy per upload format (txt, pdf, docx).
//! - **Prompt builder**: Deterministic request construction from extracted text.
//! - **Model clients**: Pluggable implementations of [`traits::model_client::ModelClient`].
//! - **Formatter**: Tolerant parsing of model output into a [`types::FeedbackResponse`].
//! - **Pipeline**: [`pipeline::FeedbackPipeline`] chains the stages for one request.

pub mod clients;
pub mod error;
pub mod export;
pub mod extractors;
pub mod formatter;
pub mod pipeline;
pub mod prompt;
pub mod test_helpers;
pub mod traits;
pub mod types;
pub mod utilities;

pub use error::{AnalyzerError, ErrorKind};
pub use pipeline::{AnalysisOutcome, FeedbackPipeline, PipelineOptions};
pub use types::{FeedbackResponse, FeedbackSection, Submission};
