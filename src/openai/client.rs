use std::time::Duration;

use async_trait::async_trait;

use super::core::{CompletionRequest, CompletionResponse};
use super::error::{ApiError, classify_error};
use crate::core::AppConfig;

/// Anything that can turn a `CompletionRequest` into a completion.
/// Implementations must report an oversized prompt as
/// `ApiError::ContextOverflow` so callers can shrink and retry.
#[async_trait]
pub trait CompletionApi {
    async fn submit(&self, request: &CompletionRequest) -> Result<CompletionResponse, ApiError>;
}

/// Client for an OpenAI compatible HTTP API.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_hostname: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_hostname: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_hostname: api_hostname.trim_end_matches("/").to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.openai_api_hostname, &config.openai_api_key)
    }
}

#[async_trait]
impl CompletionApi for OpenAiClient {
    async fn submit(&self, request: &CompletionRequest) -> Result<CompletionResponse, ApiError> {
        let url = format!("{}{}", self.api_hostname, request.endpoint());
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .timeout(Duration::from_secs(60 * 10))
            .json(&request.to_json())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = classify_error(status.as_u16(), &body);
            if !err.is_context_overflow() {
                tracing::error!("Completion request to {} failed: {}", request.endpoint(), err);
            }
            return Err(err);
        }

        CompletionResponse::parse(&request.payload, &body)
            .inspect_err(|e| tracing::error!("Parsing completion failed for {}\nError: {}", body, e))
    }
}
