//! Completion Types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sampling temperature for every completion
pub const TEMPERATURE: f32 = 0.3;

/// Token budget for every completion
pub const MAX_TOKENS: u32 = 1024;

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of a `/chat/completions` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(model: &str, system_prompt: &str, user_prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
        }
    }
}

/// Completion errors
#[derive(Debug, Error)]
pub enum CompletionError {
    /// No API key configured
    #[error("OPENROUTER_API_KEY not configured")]
    MissingApiKey,

    /// Provider answered with a non-200 status; forwarded to the caller as-is
    #[error("Completion provider returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Transport failure, including the request timeout
    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider answered 200 with a body that is not JSON
    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),
}
