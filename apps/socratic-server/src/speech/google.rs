//! Google Translate TTS backend

use std::time::Duration;

use async_trait::async_trait;

use super::{SpeechError, SpeechSynthesizer};
use crate::config::SpeechConfig;

/// Longest chunk the endpoint accepts in one request
pub const MAX_CHUNK_CHARS: usize = 100;

/// Synthesizer backed by the Google Translate TTS endpoint.
///
/// Text is split into chunks of at most [`MAX_CHUNK_CHARS`] characters, each
/// chunk is fetched as MP3, and the frames are concatenated in order.
pub struct GoogleTranslateSynthesizer {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl GoogleTranslateSynthesizer {
    pub fn new(config: &SpeechConfig) -> Result<Self, SpeechError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            language: config.language.clone(),
        })
    }

    async fn fetch_chunk(&self, chunk: &str, index: usize, total: usize) -> Result<Vec<u8>, SpeechError> {
        let query = [
            ("ie", "UTF-8".to_string()),
            ("q", chunk.to_string()),
            ("tl", self.language.clone()),
            ("client", "tw-ob".to_string()),
            ("total", total.to_string()),
            ("idx", index.to_string()),
            ("textlen", chunk.chars().count().to_string()),
        ];

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Speech request failed"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Upstream { status, body });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            audio.extend(self.fetch_chunk(chunk, index, chunks.len()).await?);
        }

        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        tracing::debug!(chunks = chunks.len(), bytes = audio.len(), "Synthesized speech");
        Ok(audio)
    }
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Words are packed greedily and never split unless a single word is longer
/// than `max_chars`. Whitespace runs collapse to one space.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Router};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    async fn spawn_tts(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/translate_tts", addr)
    }

    fn config(base_url: String) -> SpeechConfig {
        SpeechConfig {
            base_url,
            language: "en".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_split_short_text() {
        assert_eq!(split_text("Hello world", 100), vec!["Hello world"]);
    }

    #[test]
    fn test_split_blank_text() {
        assert!(split_text("   \n\t ", 100).is_empty());
    }

    #[test]
    fn test_split_packs_words_within_limit() {
        let chunks = split_text("aaa bbb ccc ddd", 7);
        assert_eq!(chunks, vec!["aaa bbb", "ccc ddd"]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 7));
    }

    #[test]
    fn test_split_long_word() {
        let chunks = split_text("ab abcdefghij cd", 4);
        assert_eq!(chunks, vec!["ab", "abcd", "efgh", "ij", "cd"]);
    }

    #[test]
    fn test_split_counts_characters_not_bytes() {
        let text = "é".repeat(10);
        assert_eq!(split_text(&text, 10), vec![text.clone()]);
    }

    #[tokio::test]
    async fn test_synthesize_concatenates_chunks_in_order() {
        let seen: Arc<Mutex<Vec<HashMap<String, String>>>> = Arc::default();
        let state = seen.clone();
        let router = Router::new().route(
            "/translate_tts",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let state = state.clone();
                async move {
                    let idx = params.get("idx").cloned().unwrap_or_default();
                    state.lock().unwrap().push(params);
                    format!("[chunk{}]", idx)
                }
            }),
        );
        let base_url = spawn_tts(router).await;
        let synthesizer = GoogleTranslateSynthesizer::new(&config(base_url)).unwrap();

        let text = "word ".repeat(40);
        let audio = synthesizer.synthesize(&text).await.unwrap();

        assert_eq!(String::from_utf8(audio).unwrap(), "[chunk0][chunk1]");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0]["tl"], "en");
        assert_eq!(seen[0]["client"], "tw-ob");
        assert_eq!(seen[0]["total"], "2");
        assert!(seen[0]["q"].starts_with("word word"));
    }

    #[tokio::test]
    async fn test_upstream_error() {
        let router = Router::new().route(
            "/translate_tts",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "try later") }),
        );
        let base_url = spawn_tts(router).await;
        let synthesizer = GoogleTranslateSynthesizer::new(&config(base_url)).unwrap();

        let err = synthesizer.synthesize("Hello").await.unwrap_err();
        assert!(matches!(err, SpeechError::Upstream { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_without_request() {
        let synthesizer =
            GoogleTranslateSynthesizer::new(&config("http://127.0.0.1:9/translate_tts".to_string()))
                .unwrap();

        let err = synthesizer.synthesize("  ").await.unwrap_err();
        assert!(matches!(err, SpeechError::EmptyText));
    }
}
