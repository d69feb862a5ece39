//! Embedding port
//!
//! Maps text to dense vectors so chunks and queries can be compared.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while computing embeddings
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Embedding request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid embedding response: {0}")]
    InvalidResponse(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Embedder not configured: {0}")]
    NotConfigured(String),
}

/// Text embedding model
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of document chunks, one vector per input in order
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Embed a search query
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
