//! Page summary endpoint
//!
//! - POST /summarize - Summarize one page, reading through the summary cache

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::cache::summary_key;
use crate::error::{AppError, Result};
use crate::state::AppState;

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are an expert academic assistant.";

const SUMMARY_INSTRUCTION: &str = "Summarize this text clearly and concisely, focusing on key ideas, \
formulas, and definitions suitable for revision.";

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub page_number: i64,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub cached: bool,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/summarize", post(summarize))
}

/// User prompt embedding the page text
pub fn summary_prompt(text: &str) -> String {
    format!("{}\n\n{}", SUMMARY_INSTRUCTION, text)
}

/// POST /summarize
async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>> {
    let key = summary_key(request.page_number, &request.text);
    let completion = state.completion();
    let text = &request.text;

    let result = state
        .summaries()
        .get_or_try_insert_with(key.clone(), || async move {
            completion
                .complete(SUMMARY_SYSTEM_PROMPT, &summary_prompt(text))
                .await
        })
        .await
        .map_err(AppError::completion("Summarization"))?;

    tracing::info!(
        page_number = request.page_number,
        key = %key,
        cached = result.cached,
        "Page summarized"
    );

    Ok(Json(SummarizeResponse {
        summary: result.summary,
        cached: result.cached,
    }))
}
