use crate::{error::ApiError, state::AppState};
use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use bytes::Bytes;
use serde_json::Value;

/// Forward the body untouched to the grounding service and relay its JSON
async fn handler(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let value = match state.grounding.ground(body).await {
        Ok(value) => value,
        Err(err) if state.null_on_grounding_failure => {
            tracing::error!(url = state.grounding.url(), error = %err, "grounding failed, relaying null");
            Value::Null
        }
        Err(err) => return Err(err.into()),
    };

    let pretty = serde_json::to_string_pretty(&value)?;
    Ok(([(CONTENT_TYPE, "application/json")], pretty).into_response())
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new().route("/anno", post(handler)).with_state(state)
}
