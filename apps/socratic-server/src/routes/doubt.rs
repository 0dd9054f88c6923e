//! Grounded question answering endpoint
//!
//! - POST /doubt - Answer a question strictly from the supplied context

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::AppState;

pub const DOUBT_SYSTEM_PROMPT: &str =
    "You are an expert academic assistant. Answer only from the provided context.";

#[derive(Debug, Serialize, Deserialize)]
pub struct DoubtRequest {
    pub question: String,
    pub context: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DoubtResponse {
    pub answer: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/doubt", post(doubt))
}

/// User prompt: context, then question, then the insufficiency instruction
pub fn doubt_prompt(context: &str, question: &str) -> String {
    format!(
        "CONTEXT:\n{}\n\nQUESTION:\n{}\n\nIf the context is insufficient, state that clearly.",
        context, question
    )
}

/// POST /doubt
async fn doubt(
    State(state): State<AppState>,
    Json(request): Json<DoubtRequest>,
) -> Result<Json<DoubtResponse>> {
    let answer = state
        .completion()
        .complete(DOUBT_SYSTEM_PROMPT, &doubt_prompt(&request.context, &request.question))
        .await
        .map_err(AppError::completion("QA"))?;

    tracing::debug!(
        context_len = request.context.len(),
        answer_len = answer.len(),
        "Question answered"
    );

    Ok(Json(DoubtResponse { answer }))
}
