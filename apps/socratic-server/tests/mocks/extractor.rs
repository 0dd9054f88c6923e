use std::collections::BTreeMap;
use std::path::Path;

use socratic_server::extract::{DocumentExtractor, ExtractError, ExtractedDocument};

/// Returns fixed pages for any file that exists
pub struct MockExtractor {
    pub pages: Vec<String>,
}

impl MockExtractor {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl DocumentExtractor for MockExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedDocument, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::Open(format!("{} does not exist", path.display())));
        }

        let mut metadata = BTreeMap::new();
        metadata.insert("Title".to_string(), "Mock Document".to_string());

        Ok(ExtractedDocument {
            pages: self.pages.clone(),
            metadata,
        })
    }
}
