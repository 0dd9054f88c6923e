//! Completion Module
//!
//! Chat-completion access for summaries and grounded Q&A.
//!
//! Handlers depend on the [`CompletionClient`] trait only; the production
//! implementation talks to an OpenRouter-compatible `/chat/completions`
//! endpoint and is injected into the application state at startup.

mod provider;
mod types;

pub use provider::{CompletionClient, OpenRouterClient};
pub use types::{ChatMessage, ChatRequest, CompletionError, MAX_TOKENS, TEMPERATURE};
