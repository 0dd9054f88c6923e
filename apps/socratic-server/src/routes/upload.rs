//! PDF upload endpoint
//!
//! - POST /upload_pdf - Store a PDF and return its page texts
//!
//! The multipart `file` field must carry a filename ending in `.pdf`. The file
//! is persisted before extraction; parsed text is returned and not retained.

use std::collections::BTreeMap;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Multipart field carrying the document
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub num_pages: usize,
    pub pages: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

/// Create the upload router. `max_bytes: None` lifts axum's default body limit.
pub fn router(max_bytes: Option<usize>) -> Router<AppState> {
    let limit = match max_bytes {
        Some(bytes) => DefaultBodyLimit::max(bytes),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/upload_pdf", post(upload_pdf))
        .layer(limit)
}

/// POST /upload_pdf
async fn upload_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();
        if !is_pdf_file_name(&file_name) {
            tracing::debug!(file_name = %file_name, "Rejected non-PDF upload");
            return Err(AppError::bad_request("Only PDF files are supported."));
        }

        let data = field.bytes().await?;

        let path = state
            .files()
            .save_upload(&file_name, &data)
            .await
            .map_err(AppError::Upload)?;

        // MuPDF parsing is CPU-bound and blocking
        let extractor = state.extractor();
        let extract_path = path.clone();
        let document = tokio::task::spawn_blocking(move || extractor.extract(&extract_path))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read PDF: {}", e)))??;

        tracing::info!(
            file_name = %file_name,
            path = %path.display(),
            bytes = data.len(),
            pages = document.page_count(),
            "PDF uploaded"
        );

        return Ok(Json(UploadResponse {
            num_pages: document.page_count(),
            pages: document.pages,
            metadata: document.metadata,
        }));
    }

    Err(AppError::bad_request("Missing 'file' field in upload."))
}

/// Accept only names ending in `.pdf`, case-insensitively
fn is_pdf_file_name(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".pdf")
}
