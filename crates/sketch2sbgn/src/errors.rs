use std::path::PathBuf;
use thiserror::Error;

use crate::assets::ReferenceAsset;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Reference asset {asset} not found at {}", .path.display())]
    Missing { asset: ReferenceAsset, path: PathBuf },

    #[error("Failed to read reference asset {asset} at {}: {source}", .path.display())]
    Read {
        asset: ReferenceAsset,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Reference document {asset} at {} is not valid UTF-8", .path.display())]
    NotUtf8 { asset: ReferenceAsset, path: PathBuf },
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Model request timed out")]
    Timeout,

    #[error("Could not reach the model provider: {0}")]
    Connection(String),

    #[error("Model provider returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Model provider error: {0}")]
    Api(String),

    #[error("Malformed model provider response: {0}")]
    MalformedResponse(String),

    #[error("Model response contained no textual answer")]
    EmptyAnswer,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::MalformedResponse(err.to_string())
        } else {
            ProviderError::Connection(err.to_string())
        }
    }
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum GroundingError {
    #[error("Grounding request timed out")]
    Timeout,

    #[error("Could not reach the grounding service: {0}")]
    Connection(String),

    #[error("Grounding service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Grounding service returned malformed JSON: {0}")]
    MalformedJson(String),
}

impl From<reqwest::Error> for GroundingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GroundingError::Timeout
        } else {
            GroundingError::Connection(err.to_string())
        }
    }
}

/// Everything that can stop a conversion request from producing an answer
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub type ProviderResult<T> = Result<T, ProviderError>;
