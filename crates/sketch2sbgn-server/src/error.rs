use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sketch2sbgn::errors::{AssetError, ConversionError, GroundingError, ProviderError};
use thiserror::Error;

use crate::configuration::ENV_PREFIX;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Invalid value for {env_var}: {reason}")]
    InvalidValue { env_var: String, reason: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Map a settings key such as `provider.api_key` to the variable that sets it
pub fn to_env_var(field: &str) -> String {
    match field {
        "api_key" | "provider.api_key" => "OPEN_API_KEY".to_string(),
        "port" | "server.port" => "PORT".to_string(),
        _ => format!("{}_{}", ENV_PREFIX, field.replace('.', "__")).to_uppercase(),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Failures surfaced to HTTP callers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Grounding(#[from] GroundingError),

    #[error("Failed to encode response: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::Asset(e) => ApiError::Asset(e),
            ConversionError::Provider(e) => ApiError::Provider(e),
        }
    }
}

impl ApiError {
    pub fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            ApiError::Asset(_) => (StatusCode::INTERNAL_SERVER_ERROR, "asset_unavailable"),
            ApiError::Encoding(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ApiError::Provider(ProviderError::Timeout)
            | ApiError::Grounding(GroundingError::Timeout) => {
                (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout")
            }
            ApiError::Provider(ProviderError::Connection(_))
            | ApiError::Grounding(GroundingError::Connection(_)) => {
                (StatusCode::BAD_GATEWAY, "upstream_unreachable")
            }
            ApiError::Provider(ProviderError::UpstreamStatus { .. })
            | ApiError::Grounding(GroundingError::Status { .. }) => {
                (StatusCode::BAD_GATEWAY, "upstream_status")
            }
            ApiError::Provider(_) | ApiError::Grounding(_) => {
                (StatusCode::BAD_GATEWAY, "upstream_invalid_response")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            tracing::error!(kind, error = %self, "request failed");
        } else {
            tracing::warn!(kind, error = %self, "rejected request");
        }

        (
            status,
            Json(ErrorResponse {
                error: kind.to_string(),
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
