//! Error types for the OpenAI adapters

use rag_application::{EmbeddingError, GatewayError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("API key not found in environment variable {0}")]
    MissingApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for OpenAiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OpenAiError::Timeout
        } else if err.is_decode() {
            OpenAiError::Decode(err.to_string())
        } else {
            OpenAiError::Connection(err.to_string())
        }
    }
}

impl From<OpenAiError> for GatewayError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::MissingApiKey(_) => GatewayError::Authentication(err.to_string()),
            OpenAiError::Timeout => GatewayError::Timeout,
            OpenAiError::Connection(msg) | OpenAiError::Client(msg) => {
                GatewayError::ConnectionError(msg)
            }
            OpenAiError::Status { status: 401 | 403, message } => {
                GatewayError::Authentication(message)
            }
            OpenAiError::Status { status: 404, message } => GatewayError::ModelNotAvailable(message),
            OpenAiError::Status { .. } => GatewayError::RequestFailed(err.to_string()),
            OpenAiError::Decode(msg) => GatewayError::InvalidResponse(msg),
        }
    }
}

impl From<OpenAiError> for EmbeddingError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::MissingApiKey(_) => EmbeddingError::NotConfigured(err.to_string()),
            OpenAiError::Decode(msg) => EmbeddingError::InvalidResponse(msg),
            other => EmbeddingError::RequestFailed(other.to_string()),
        }
    }
}
