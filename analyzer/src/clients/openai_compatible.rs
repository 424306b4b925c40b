//! # OpenAI-compatible Chat Client
//!
//! [`ChatCompletionsClient`] implements [`ModelClient`] against any endpoint that
//! speaks the OpenAI chat completions protocol (`POST {base_url}/chat/completions`).
//! The base URL makes it usable with hosted providers and local model servers.
//!
//! The response body is decoded into a typed structure before anything is
//! returned; an answer that does not match the schema or carries no content is a
//! [`AnalyzerError::ModelError`].

use crate::error::AnalyzerError;
use crate::traits::model_client::ModelClient;
use crate::types::FeedbackRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use util::config::AppConfig;

/// Base URL used when only an API key is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Maximum number of characters of an error body kept for the logs.
const BODY_EXCERPT_CHARS: usize = 300;

/// Explicit configuration for a [`ChatCompletionsClient`].
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Deadline for the whole request, from connect to the last body byte.
    pub timeout: Duration,
    pub temperature: f32,
}

impl ModelConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: String::new(),
            model: model.into(),
            timeout: Duration::from_secs(60),
            temperature: 0.2,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the model configuration from a snapshot of the application config.
    pub fn from_app_config(config: &AppConfig) -> Self {
        let base_url = if config.model_base_url.trim().is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            config.model_base_url.trim().to_string()
        };

        Self {
            base_url,
            api_key: config.model_api_key.clone(),
            model: config.model_name.clone(),
            timeout: Duration::from_secs(config.model_timeout_seconds),
            temperature: config.model_temperature,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Request body for the chat completions endpoint.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

/// A single chat message in the request.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the chat completions endpoint.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// A single candidate completion.
#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Model client for OpenAI-compatible chat completion endpoints.
pub struct ChatCompletionsClient {
    config: ModelConfig,
    http: Client,
}

impl ChatCompletionsClient {
    pub fn new(config: ModelConfig) -> Result<Self, AnalyzerError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnalyzerError::ModelUnavailable(format!("http client setup: {e}")))?;
        Ok(Self { config, http })
    }

    fn transport_error(&self, e: reqwest::Error) -> AnalyzerError {
        if e.is_timeout() {
            AnalyzerError::ModelTimeout(self.config.timeout)
        } else {
            AnalyzerError::ModelUnavailable(e.to_string())
        }
    }
}

#[async_trait]
impl ModelClient for ChatCompletionsClient {
    async fn complete(&self, request: &FeedbackRequest) -> Result<String, AnalyzerError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system(),
                },
                ChatMessage {
                    role: "user",
                    content: request.user(),
                },
            ],
            temperature: self.config.temperature,
        };

        let mut call = self.http.post(self.config.endpoint()).json(&body);
        if !self.config.api_key.is_empty() {
            call = call.bearer_auth(&self.config.api_key);
        }

        let started = Instant::now();
        let response = call.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if !status.is_success() {
            let excerpt: String = text.chars().take(BODY_EXCERPT_CHARS).collect();
            warn!(%status, elapsed_ms, "model endpoint returned an error status");
            return Err(AnalyzerError::ModelError(format!("status {status}: {excerpt}")));
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            AnalyzerError::ModelError(format!("error decoding response body: {e}"))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AnalyzerError::ModelError("response contains no choices".into()))?;

        if choice.finish_reason.as_deref() == Some("length") {
            warn!("model output was cut off at the token limit");
        }

        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                AnalyzerError::ModelError("response contains no message content".into())
            })?;

        info!(
            model = %self.config.model,
            elapsed_ms,
            chars = content.len(),
            "model call completed"
        );
        debug!(content = %content, "raw model output");
        Ok(content)
    }
}
