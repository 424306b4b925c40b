//! # Model Clients
//!
//! Implementations of [`crate::traits::model_client::ModelClient`].
//!
//! - [`openai_compatible`]: HTTP client for OpenAI-compatible chat completion endpoints.
//! - [`offline`]: Fixed placeholder feedback for deployments without a model endpoint.

pub mod offline;
pub mod openai_compatible;

use crate::error::AnalyzerError;
use crate::traits::model_client::ModelClient;
use offline::OfflineModelClient;
use openai_compatible::{ChatCompletionsClient, ModelConfig};
use std::sync::Arc;
use tracing::{info, warn};
use util::config::AppConfig;

/// Picks the client for this deployment: the chat client when an endpoint is
/// configured, the offline fallback otherwise.
pub fn client_from_config(config: &AppConfig) -> Result<Arc<dyn ModelClient>, AnalyzerError> {
    if !config.model_configured() {
        warn!("no model endpoint configured; serving placeholder feedback");
        return Ok(Arc::new(OfflineModelClient));
    }

    let model_config = ModelConfig::from_app_config(config);
    info!(
        base_url = %model_config.base_url,
        model = %model_config.model,
        timeout_secs = model_config.timeout.as_secs(),
        "using chat completions model client"
    );
    Ok(Arc::new(ChatCompletionsClient::new(model_config)?))
}
