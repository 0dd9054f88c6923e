//! PDF text extraction using MuPDF

use std::collections::BTreeMap;
use std::path::Path;

use mupdf::{Document, MetadataName};

use super::{DocumentExtractor, ExtractError, ExtractedDocument};

/// MuPDF-backed extractor
///
/// A fresh `Document` is opened per call; MuPDF documents are not shared
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfExtractor;

impl MupdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Info-dictionary entries that are present and non-empty
    fn extract_metadata(doc: &Document) -> BTreeMap<String, String> {
        let fields = [
            (MetadataName::Title, "Title"),
            (MetadataName::Author, "Author"),
            (MetadataName::Subject, "Subject"),
            (MetadataName::Keywords, "Keywords"),
            (MetadataName::Creator, "Creator"),
            (MetadataName::Producer, "Producer"),
            (MetadataName::CreationDate, "CreationDate"),
            (MetadataName::ModDate, "ModDate"),
        ];

        fields
            .into_iter()
            .filter_map(|(name, key)| {
                doc.metadata(name)
                    .ok()
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
                    .map(|value| (key.to_string(), value))
            })
            .collect()
    }
}

impl DocumentExtractor for MupdfExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedDocument, ExtractError> {
        let path_str = path.to_string_lossy();
        let doc = Document::open(&*path_str).map_err(|e| ExtractError::Open(e.to_string()))?;
        let page_count = doc
            .page_count()
            .map_err(|e| ExtractError::Open(e.to_string()))?
            .max(0) as usize;

        let mut pages = Vec::with_capacity(page_count);
        for index in 0..page_count {
            let page_error = |e: mupdf::Error| ExtractError::Page {
                page: index + 1,
                message: e.to_string(),
            };
            let page = doc.load_page(index as i32).map_err(page_error)?;
            pages.push(page.to_text().map_err(page_error)?);
        }

        tracing::debug!(path = %path.display(), pages = page_count, "Extracted PDF text");

        Ok(ExtractedDocument {
            pages,
            metadata: Self::extract_metadata(&doc),
        })
    }
}
