use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use socratic_server::speech::{SpeechError, SpeechSynthesizer};

pub const MOCK_AUDIO: &[u8] = b"ID3\x04\x00mock-audio";

#[derive(Clone, Default)]
pub struct MockSpeech {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with_status: Option<u16>,
}

impl MockSpeech {
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        self.calls.lock().unwrap().push(text.to_string());
        if let Some(status) = self.fail_with_status {
            return Err(SpeechError::Upstream {
                status,
                body: "speech backend down".to_string(),
            });
        }
        Ok(MOCK_AUDIO.to_vec())
    }
}
