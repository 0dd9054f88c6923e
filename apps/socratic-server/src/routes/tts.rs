//! Text-to-speech endpoint
//!
//! - POST /tts - Synthesize a summary into an audio file under /media

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TtsRequest {
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TtsResponse {
    pub url: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/tts", post(tts))
}

/// POST /tts
///
/// Every call synthesizes and writes a new file, even for repeated text.
async fn tts(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> Result<Json<TtsResponse>> {
    if request.summary.trim().is_empty() {
        return Err(AppError::bad_request("Summary is empty"));
    }

    let speech = state.speech();
    let audio = speech.synthesize(&request.summary).await?;

    let media = state
        .files()
        .save_audio(speech.extension(), &audio)
        .await
        .map_err(|e| AppError::Internal(format!("TTS failed: {}", e)))?;

    tracing::info!(file_name = %media.file_name, bytes = audio.len(), "Speech generated");

    Ok(Json(TtsResponse { url: media.url() }))
}
