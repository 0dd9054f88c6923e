//! Document Extraction
//!
//! Turns a stored PDF into ordered page texts plus its info-dictionary
//! metadata. Extraction is blocking; callers run it on the blocking pool.

mod mupdf_extractor;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

pub use mupdf_extractor::MupdfExtractor;

/// Text and metadata pulled out of one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    /// Page texts in page order; pages without a text layer are empty strings
    pub pages: Vec<String>,
    /// Info-dictionary entries (`Title`, `Author`, ...) that are present
    pub metadata: BTreeMap<String, String>,
}

impl ExtractedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to open document: {0}")]
    Open(String),

    #[error("Failed to extract text from page {page}: {message}")]
    Page { page: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Document extractor trait
pub trait DocumentExtractor: Send + Sync {
    /// Extract page texts and metadata from the file at `path`
    fn extract(&self, path: &Path) -> Result<ExtractedDocument, ExtractError>;
}
