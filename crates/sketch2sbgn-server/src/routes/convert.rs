use crate::{error::ApiError, state::AppState};
use axum::{extract::State, routing::post, Json, Router};
use bytes::Bytes;
use serde::Deserialize;
use sketch2sbgn::prompt::ConversionRequest;

// Types matching the incoming JSON structure
#[derive(Debug, Deserialize)]
struct ConvertBody {
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

/// Bodies are read raw so that callers which omit the JSON content type
/// still work, and so parse failures map to a readable 400
fn parse_request(body: &[u8]) -> Result<ConversionRequest, ApiError> {
    let parsed: ConvertBody = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;

    let image = parsed
        .image
        .filter(|image| !image.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing required field `image`".to_string()))?;

    let request = ConversionRequest::new(image);
    Ok(match parsed.comment {
        Some(comment) => request.with_comment(comment),
        None => request,
    })
}

/// Convert a hand-drawn diagram; the answer is relayed as a JSON string
async fn handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<String>, ApiError> {
    let request = parse_request(&body)?;
    let answer = state.converter.convert(&request).await?;
    Ok(Json(answer.into_inner()))
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new().route("/gpt", post(handler)).with_state(state)
}
