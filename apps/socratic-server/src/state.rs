//! Application state management

use std::sync::Arc;

use crate::cache::SummaryCache;
use crate::completion::{CompletionClient, CompletionError, OpenRouterClient};
use crate::config::Config;
use crate::extract::{DocumentExtractor, MupdfExtractor};
use crate::speech::{GoogleTranslateSynthesizer, SpeechError, SpeechSynthesizer};
use crate::storage::FileStore;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to initialize completion client: {0}")]
    CompletionInit(#[from] CompletionError),

    #[error("Failed to initialize speech synthesizer: {0}")]
    SpeechInit(#[from] SpeechError),

    #[error("Failed to prepare storage directories: {0}")]
    Storage(#[from] std::io::Error),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    files: FileStore,
    summaries: SummaryCache,
    extractor: Arc<dyn DocumentExtractor>,
    completion: Arc<dyn CompletionClient>,
    speech: Arc<dyn SpeechSynthesizer>,
}

impl AppState {
    /// Assemble state from already-built capabilities
    pub fn new(
        config: Config,
        files: FileStore,
        extractor: Arc<dyn DocumentExtractor>,
        completion: Arc<dyn CompletionClient>,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                files,
                summaries: SummaryCache::new(),
                extractor,
                completion,
                speech,
            }),
        }
    }

    /// Build the production capabilities from configuration.
    ///
    /// Creates the storage directories. A missing completion API key is not
    /// an error here; it is reported on each completion request.
    pub async fn from_config(config: Config) -> Result<Self, StateError> {
        let files = FileStore::new(&config.storage.upload_dir, &config.storage.media_dir);
        files.ensure_dirs().await?;

        let completion = OpenRouterClient::new(&config.completion)?;
        if !completion.has_api_key() {
            tracing::warn!("OPENROUTER_API_KEY is not set; /summarize and /doubt will fail");
        }
        tracing::info!(model = %completion.model(), "Completion client ready");

        let speech = GoogleTranslateSynthesizer::new(&config.speech)?;

        Ok(Self::new(
            config,
            files,
            Arc::new(MupdfExtractor::new()),
            Arc::new(completion),
            Arc::new(speech),
        ))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the file store
    pub fn files(&self) -> &FileStore {
        &self.inner.files
    }

    /// Get the summary cache
    pub fn summaries(&self) -> &SummaryCache {
        &self.inner.summaries
    }

    pub fn extractor(&self) -> Arc<dyn DocumentExtractor> {
        self.inner.extractor.clone()
    }

    pub fn completion(&self) -> &dyn CompletionClient {
        self.inner.completion.as_ref()
    }

    pub fn speech(&self) -> &dyn SpeechSynthesizer {
        self.inner.speech.as_ref()
    }
}
