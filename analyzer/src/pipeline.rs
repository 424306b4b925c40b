//! # Feedback Pipeline
//!
//! Runs one submission through every stage:
//! extraction → prompt building → model call → response parsing.
//!
//! The pipeline holds no per-request state and is shared between requests
//! behind an `Arc`. Each stage's failure ends the request; nothing is retried.

use crate::error::AnalyzerError;
use crate::extractors::extract_submission;
use crate::formatter::parse_feedback;
use crate::prompt::{PromptBuilder, PromptOptions};
use crate::traits::model_client::ModelClient;
use crate::types::{FeedbackResponse, Submission, TextSource};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use util::config::{AppConfig, DEFAULT_MAX_TEXT_CHARS};

/// Tunables for a [`FeedbackPipeline`].
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub max_text_chars: usize,
    pub prompt: PromptOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            prompt: PromptOptions::default(),
        }
    }
}

impl PipelineOptions {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_text_chars: config.max_text_chars,
            ..Self::default()
        }
    }
}

/// Feedback plus metadata about how it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub feedback: FeedbackResponse,
    /// `false` when the offline placeholder client answered.
    pub ai_used: bool,
    /// Characters of extracted text.
    pub text_length: usize,
    pub source: TextSource,
    pub analyzed_at: DateTime<Utc>,
}

pub struct FeedbackPipeline {
    client: Arc<dyn ModelClient>,
    prompt: PromptBuilder,
    options: PipelineOptions,
}

impl FeedbackPipeline {
    pub fn new(client: Arc<dyn ModelClient>, options: PipelineOptions) -> Self {
        Self {
            client,
            prompt: PromptBuilder::new(options.prompt),
            options,
        }
    }

    /// Produces structured feedback for a submission.
    ///
    /// Extraction failures return before the model is contacted.
    pub async fn analyze(&self, submission: Submission) -> Result<AnalysisOutcome, AnalyzerError> {
        let started = Instant::now();
        let max_chars = self.options.max_text_chars;

        let extracted = match submission {
            Submission::Text(_) => extract_submission(&submission, max_chars)?,
            Submission::File { .. } => {
                // PDF and DOCX parsing is CPU-bound.
                tokio::task::spawn_blocking(move || extract_submission(&submission, max_chars))
                    .await
                    .map_err(|e| {
                        AnalyzerError::UnsupportedDocument(format!("extraction aborted: {e}"))
                    })??
            }
        };

        let text_length = extracted.char_count();
        let source = extracted.source();
        info!(%source, text_length, "submission extracted");

        let request = self.prompt.build(&extracted);
        let raw = self.client.complete(&request).await?;
        let feedback = parse_feedback(&raw)?;

        let ai_used = self.client.is_live();
        if !ai_used {
            warn!("returning placeholder feedback from the offline client");
        }
        info!(
            %source,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "feedback produced"
        );

        Ok(AnalysisOutcome {
            feedback,
            ai_used,
            text_length,
            source,
            analyzed_at: Utc::now(),
        })
    }
}
