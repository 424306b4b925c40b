//! Application state container shared across Axum route handlers.
//!
//! The state is immutable after startup and cheap to clone: handlers receive it
//! through Axum's `State<T>` extractor and only read from it.

use analyzer::clients::client_from_config;
use analyzer::traits::model_client::ModelClient;
use analyzer::{AnalyzerError, FeedbackPipeline, PipelineOptions};
use std::sync::Arc;
use util::config::AppConfig;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<FeedbackPipeline>,
    max_upload_bytes: usize,
}

impl AppState {
    /// Creates a new `AppState` around an explicit model client.
    ///
    /// Tests use this to inject a stub client.
    pub fn new(
        client: Arc<dyn ModelClient>,
        options: PipelineOptions,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            pipeline: Arc::new(FeedbackPipeline::new(client, options)),
            max_upload_bytes,
        }
    }

    /// Builds the state for a deployment from a configuration snapshot.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalyzerError> {
        let client = client_from_config(config)?;
        Ok(Self::new(
            client,
            PipelineOptions::from_app_config(config),
            config.max_upload_bytes,
        ))
    }

    pub fn pipeline(&self) -> &FeedbackPipeline {
        &self.pipeline
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
