//! Pass-through client for the entity grounding service.
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::GroundingError;

pub const GROUNDING_URL: &str = "http://grounding.indra.bio/ground_multi";
pub const GROUNDING_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct GroundingConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            url: GROUNDING_URL.to_string(),
            timeout: GROUNDING_TIMEOUT,
        }
    }
}

pub struct GroundingClient {
    client: Client,
    config: GroundingConfig,
}

impl GroundingClient {
    pub fn new(config: GroundingConfig) -> Result<Self, GroundingError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GroundingError::Connection(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Forward the body exactly as received and parse the reply as JSON
    pub async fn ground(&self, body: Bytes) -> Result<Value, GroundingError> {
        let response = self
            .client
            .post(&self.config.url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(GroundingError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| GroundingError::MalformedJson(e.to_string()))
    }
}
