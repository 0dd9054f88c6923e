//! Local file storage for uploads and generated media
//!
//! Every stored file gets a random identifier in its name so concurrent
//! requests never collide. Nothing is ever deleted.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// URL prefix under which the media directory is served
pub const MEDIA_URL_PREFIX: &str = "/media";

/// A file written to the media directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub file_name: String,
    pub path: PathBuf,
}

impl StoredMedia {
    /// Public URL of the file, relative to the server root
    pub fn url(&self) -> String {
        format!("{}/{}", MEDIA_URL_PREFIX, self.file_name)
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    upload_dir: PathBuf,
    media_dir: PathBuf,
}

impl FileStore {
    pub fn new(upload_dir: impl Into<PathBuf>, media_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            media_dir: media_dir.into(),
        }
    }

    /// Create the upload and media directories if missing
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::create_dir_all(&self.media_dir).await?;
        Ok(())
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Persist an uploaded file as `<uuid>_<basename>` and return its path
    pub async fn save_upload(&self, file_name: &str, data: &[u8]) -> std::io::Result<PathBuf> {
        let path = self
            .upload_dir
            .join(format!("{}_{}", Uuid::new_v4(), sanitize_file_name(file_name)));
        tokio::fs::write(&path, data).await?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored upload");
        Ok(path)
    }

    /// Write generated audio as `tts_<uuid>.<extension>` in the media directory
    pub async fn save_audio(&self, extension: &str, data: &[u8]) -> std::io::Result<StoredMedia> {
        let file_name = format!("tts_{}.{}", Uuid::new_v4(), extension);
        let path = self.media_dir.join(&file_name);
        tokio::fs::write(&path, data).await?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored audio");
        Ok(StoredMedia { file_name, path })
    }
}

/// Keep only the final path component of a client-supplied file name
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or("")
        .trim();

    match base {
        "" | "." | ".." => "upload".to_string(),
        name => name.to_string(),
    }
}
