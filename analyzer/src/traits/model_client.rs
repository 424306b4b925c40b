//!
//! # Model Client Trait
//!
//! This module defines the [`ModelClient`] trait, the seam between the analysis
//! pipeline and the hosted language model. The pipeline only ever holds an
//! `Arc<dyn ModelClient>`, so the HTTP client, the offline fallback, and test stubs
//! are interchangeable.
//!

use crate::error::AnalyzerError;
use crate::types::FeedbackRequest;
use async_trait::async_trait;

/// A client that sends one [`FeedbackRequest`] to a model and returns its raw text.
///
/// # Contract
/// - Exactly one attempt per call; no retries.
/// - `Ok(text)` is the model's answer, unparsed.
/// - Failures map to [`AnalyzerError::ModelUnavailable`],
///   [`AnalyzerError::ModelTimeout`] or [`AnalyzerError::ModelError`].
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, request: &FeedbackRequest) -> Result<String, AnalyzerError>;

    /// Whether answers come from a real model. The offline fallback returns `false`.
    fn is_live(&self) -> bool {
        true
    }
}
