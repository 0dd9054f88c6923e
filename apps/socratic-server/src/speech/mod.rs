//! Speech Synthesis
//!
//! Text-to-speech for page summaries. Handlers depend on the
//! [`SpeechSynthesizer`] trait; the production backend is the Google
//! Translate TTS endpoint, which returns MP3 audio for short text chunks.

mod google;

use async_trait::async_trait;
use thiserror::Error;

pub use google::{split_text, GoogleTranslateSynthesizer, MAX_CHUNK_CHARS};

/// Speech synthesis errors
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Nothing to synthesize")]
    EmptyText,

    #[error("Speech request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Speech service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Speech service returned no audio")]
    EmptyAudio,
}

/// Speech synthesizer trait
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// File extension of the produced audio, without the dot
    fn extension(&self) -> &'static str {
        "mp3"
    }

    /// Synthesize `text` into encoded audio
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;
}
