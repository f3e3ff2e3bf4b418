use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::base::{Provider, Usage};
use super::configs::OpenAiProviderConfig;
use super::utils::{get_usage, messages_to_openai_spec, openai_response_to_message};
use crate::errors::{ProviderError, ProviderResult};
use crate::models::message::Message;

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn post(&self, payload: Value) -> ProviderResult<Value> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ProviderError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, messages: &[Message]) -> ProviderResult<(Message, Usage)> {
        let mut payload = json!({
            "model": self.config.model,
            "messages": messages_to_openai_spec(messages)
        });

        // Add optional parameters
        if let Some(object) = payload.as_object_mut() {
            if let Some(temp) = self.config.temperature {
                object.insert("temperature".to_string(), json!(temp));
            }
            if let Some(tokens) = self.config.max_tokens {
                object.insert("max_tokens".to_string(), json!(tokens));
            }
        }

        let response = self.post(payload).await?;

        if let Some(error) = response.get("error") {
            return Err(ProviderError::Api(error.to_string()));
        }

        let message = openai_response_to_message(&response)?;
        let usage = get_usage(&response);
        tracing::info!(
            model = %self.config.model,
            input_tokens = ?usage.input_tokens,
            output_tokens = ?usage.output_tokens,
            "model completion received"
        );

        Ok((message, usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(host: String) -> OpenAiProviderConfig {
        OpenAiProviderConfig {
            host,
            api_key: "test_api_key".to_string(),
            model: "gpt-4o".to_string(),
            timeout: Duration::from_secs(5),
            temperature: None,
            max_tokens: None,
        }
    }

    async fn _setup_mock_server(template: ResponseTemplate) -> (MockServer, OpenAiProvider) {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(template)
            .mount(&mock_server)
            .await;

        let provider = OpenAiProvider::new(config(mock_server.uri())).unwrap();
        (mock_server, provider)
    }

    #[tokio::test]
    async fn test_complete_basic() {
        let response_body = json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "{\"answer\": \"<sbgn/>\"}"
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 12,
                "completion_tokens": 15,
                "total_tokens": 27
            }
        });
        let (_server, provider) =
            _setup_mock_server(ResponseTemplate::new(200).set_body_json(response_body)).await;

        let messages = vec![Message::user().with_text("Hello?")];
        let (message, usage) = provider.complete(&messages).await.unwrap();

        assert_eq!(message.text(), "{\"answer\": \"<sbgn/>\"}");
        assert_eq!(usage.input_tokens, Some(12));
        assert_eq!(usage.output_tokens, Some(15));
        assert_eq!(usage.total_tokens, Some(27));
    }

    #[tokio::test]
    async fn test_request_carries_model_auth_and_parts() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test_api_key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": [
                        {"type": "text", "text": "look"},
                        {"type": "image_url", "image_url": {"url": "data:image/png;base64,AA=="}}
                    ]}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "ok"}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAiProvider::new(config(mock_server.uri())).unwrap();
        let messages = vec![
            Message::system().with_text("sys"),
            Message::user()
                .with_text("look")
                .with_image("data:image/png;base64,AA=="),
        ];
        let (message, usage) = provider.complete(&messages).await.unwrap();
        assert_eq!(message.text(), "ok");
        assert_eq!(usage, Usage::default());
    }

    #[tokio::test]
    async fn test_upstream_status_is_reported() {
        let (_server, provider) = _setup_mock_server(
            ResponseTemplate::new(429).set_body_string("rate limited"),
        )
        .await;

        let err = provider
            .complete(&[Message::user().with_text("hi")])
            .await
            .unwrap_err();
        match err {
            ProviderError::UpstreamStatus { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_object() {
        let (_server, provider) = _setup_mock_server(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": {"message": "bad image", "code": "invalid"}})),
        )
        .await;

        let err = provider
            .complete(&[Message::user().with_text("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Api(ref msg) if msg.contains("bad image")));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (_server, provider) =
            _setup_mock_server(ResponseTemplate::new(200).set_body_string("<html>")).await;

        let err = provider
            .complete(&[Message::user().with_text("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": []}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let mut config = config(mock_server.uri());
        config.timeout = Duration::from_millis(200);
        let provider = OpenAiProvider::new(config).unwrap();

        let err = provider
            .complete(&[Message::user().with_text("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Timeout));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let provider = OpenAiProvider::new(config("http://127.0.0.1:9".to_string())).unwrap();
        let err = provider
            .complete(&[Message::user().with_text("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Connection(_)));
    }
}
