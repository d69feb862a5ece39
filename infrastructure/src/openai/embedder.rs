//! `/v1/embeddings` adapter

use super::client::OpenAiClient;
use super::wire::{EmbeddingData, EmbeddingRequest, EmbeddingResponse};
use async_trait::async_trait;
use rag_application::ports::embedder::{Embedder, EmbeddingError};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Embeds text with an OpenAI embedding model
pub struct OpenAiEmbedder {
    client: Arc<OpenAiClient>,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(client: Arc<OpenAiClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Put vectors back into input order and check there is one per input
fn order_embeddings(
    mut data: Vec<EmbeddingData>,
    expected: usize,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    if data.len() != expected {
        return Err(EmbeddingError::InvalidResponse(format!(
            "expected {} embeddings, got {}",
            expected,
            data.len()
        )));
    }
    data.sort_by_key(|d| d.index);
    if data.iter().enumerate().any(|(i, d)| d.index != i) {
        return Err(EmbeddingError::InvalidResponse(
            "embedding indices are not contiguous".to_string(),
        ));
    }
    Ok(data.into_iter().map(|d| d.embedding).collect())
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };
        let response: EmbeddingResponse = self.client.post("embeddings", &request).await?;
        debug!("Embedded {} texts with {}", texts.len(), self.model);

        order_embeddings(response.data, texts.len())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed_documents(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| EmbeddingError::InvalidResponse("empty embedding response".to_string()))
    }
}
