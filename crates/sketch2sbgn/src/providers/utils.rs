use serde_json::{json, Value};

use crate::errors::{ProviderError, ProviderResult};
use crate::models::content::Content;
use crate::models::message::Message;
use crate::providers::base::Usage;

/// Convert internal Message format to OpenAI's API message specification
///   a turn holding a single text part is sent as a plain string, any other
///   turn is sent as an ordered list of text and image_url parts
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| {
            let content = match message.content.as_slice() {
                [Content::Text(text)] => json!(text.text),
                parts => Value::Array(parts.iter().map(convert_content).collect()),
            };
            json!({
                "role": message.role,
                "content": content,
            })
        })
        .collect()
}

fn convert_content(content: &Content) -> Value {
    match content {
        Content::Text(text) => json!({
            "type": "text",
            "text": text.text,
        }),
        Content::Image(image) => json!({
            "type": "image_url",
            "image_url": {
                "url": image.url
            }
        }),
    }
}

/// Convert OpenAI's API response to internal Message format
///   only the first choice is considered
pub fn openai_response_to_message(response: &Value) -> ProviderResult<Message> {
    let choices = response
        .get("choices")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::MalformedResponse("missing choices".to_string()))?;

    let first = choices.first().ok_or(ProviderError::EmptyAnswer)?;
    let content = first
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .ok_or(ProviderError::EmptyAnswer)?;

    Ok(Message::assistant().with_text(content))
}

pub fn get_usage(data: &Value) -> Usage {
    let Some(usage) = data.get("usage") else {
        return Usage::default();
    };

    let input_tokens = usage
        .get("prompt_tokens")
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok());

    let output_tokens = usage
        .get("completion_tokens")
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok());

    let total_tokens = usage
        .get("total_tokens")
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => input.checked_add(output),
            _ => None,
        });

    Usage::new(input_tokens, output_tokens, total_tokens)
}
