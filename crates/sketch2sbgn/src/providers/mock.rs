use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;
use crate::providers::base::{Provider, Usage};

/// A mock provider that returns pre-configured responses and records requests
pub struct MockProvider {
    responses: Arc<Mutex<Vec<ProviderResult<Message>>>>,
    pub requests: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<ProviderResult<Message>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider that answers every request with the same text
    pub fn answering(text: &str, times: usize) -> Self {
        Self::new(
            (0..times)
                .map(|_| Ok(Message::assistant().with_text(text)))
                .collect(),
        )
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn model(&self) -> &str {
        "mock"
    }

    async fn complete(&self, messages: &[Message]) -> ProviderResult<(Message, Usage)> {
        self.requests.lock().unwrap().push(messages.to_vec());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(ProviderError::EmptyAnswer)
        } else {
            responses
                .remove(0)
                .map(|message| (message, Usage::default()))
        }
    }
}
