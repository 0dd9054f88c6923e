//! Completion Providers
//!
//! Defines the client trait and the OpenRouter chat-completions adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::types::{ChatRequest, CompletionError};
use crate::config::CompletionConfig;

/// Completion client trait
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a completion for a system prompt and a user prompt
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, CompletionError>;
}

/// OpenRouter-compatible chat-completions client
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    referer: String,
    title: String,
}

impl OpenRouterClient {
    pub fn new(config: &CompletionConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            referer: config.referer.clone(),
            title: config.title.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;

        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest::new(&self.model, system_prompt, user_prompt);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.title)
            .json(&request)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Completion request failed"))?;

        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .inspect_err(|e| tracing::error!(error = %e, status, "Failed to read provider error body"))
                .unwrap_or_default();
            tracing::warn!(status, model = %self.model, "Completion provider returned an error");
            return Err(CompletionError::Upstream { status, body });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(first_choice_content(&value))
    }
}

/// `choices[0].message.content`, or an empty string when any part is missing
fn first_choice_content(response: &Value) -> String {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}
