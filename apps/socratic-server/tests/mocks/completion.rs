use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use socratic_server::completion::{CompletionClient, CompletionError};

#[derive(Clone)]
enum Behavior {
    Reply(String),
    Upstream { status: u16, body: String },
    MissingApiKey,
}

/// Records every (system, user) prompt pair it receives
#[derive(Clone)]
pub struct MockCompletion {
    behavior: Behavior,
    delay: Option<Duration>,
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockCompletion {
    pub fn new(reply: &str) -> Self {
        Self {
            behavior: Behavior::Reply(reply.to_string()),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn upstream(status: u16, body: &str) -> Self {
        Self {
            behavior: Behavior::Upstream {
                status,
                body: body.to_string(),
            },
            ..Self::new("")
        }
    }

    pub fn missing_api_key() -> Self {
        Self {
            behavior: Behavior::MissingApiKey,
            ..Self::new("")
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, CompletionError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            Behavior::Reply(reply) => Ok(reply.clone()),
            Behavior::Upstream { status, body } => Err(CompletionError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            Behavior::MissingApiKey => Err(CompletionError::MissingApiKey),
        }
    }
}
