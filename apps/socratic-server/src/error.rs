//! Error types for the SocraticStudy server

use axum::{
    extract::multipart::MultipartError,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::completion::CompletionError;
use crate::extract::ExtractError;
use crate::speech::SpeechError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    /// Unreadable multipart body, including one over the upload size limit
    #[error("Failed to read upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Failed to save upload: {0}")]
    Upload(#[source] std::io::Error),

    #[error("Failed to read PDF: {0}")]
    Extraction(#[from] ExtractError),

    /// A completion call made on behalf of `task` failed
    #[error("{task} failed: {source}")]
    Completion {
        task: &'static str,
        #[source]
        source: CompletionError,
    },

    #[error("TTS failed: {0}")]
    Speech(#[from] SpeechError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn completion(task: &'static str) -> impl FnOnce(CompletionError) -> Self {
        move |source| AppError::Completion { task, source }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Completion {
                source: CompletionError::Upstream { status, body },
                ..
            } => {
                tracing::warn!(status, "Forwarding completion provider error");
                return upstream_response(*status, body.clone());
            }
            AppError::Completion {
                source: source @ CompletionError::MissingApiKey,
                ..
            } => {
                tracing::error!("{}", source);
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", source.to_string())
            }
            AppError::Completion { .. } => {
                tracing::error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "completion_error", self.to_string())
            }
            AppError::Multipart(e) => {
                let status = e.status();
                tracing::warn!(%status, "{}", self);
                let error_type = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "payload_too_large"
                } else {
                    "bad_request"
                };
                (status, error_type, self.to_string())
            }
            AppError::Upload(_) => {
                tracing::error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", self.to_string())
            }
            AppError::Extraction(_) => {
                tracing::error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "extraction_error", self.to_string())
            }
            AppError::Speech(_) => {
                tracing::error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "speech_error", self.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        (status, Json(ErrorResponse { error: error_type, message })).into_response()
    }
}

/// Relay a provider error with its own status code and body
fn upstream_response(status: u16, body: String) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = if serde_json::from_str::<serde_json::Value>(&body).is_ok() {
        "application/json"
    } else {
        "text/plain; charset=utf-8"
    };

    (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
}
