use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderResult;
use crate::models::message::Message;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Base trait for multimodal chat-completion providers
#[async_trait]
pub trait Provider: Send + Sync {
    /// Model identifier sent with every request
    fn model(&self) -> &str;

    /// Generate the next message for an ordered conversation
    async fn complete(&self, messages: &[Message]) -> ProviderResult<(Message, Usage)>;
}
