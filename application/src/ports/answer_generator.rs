//! Answer generation port
//!
//! The single capability the consensus selector depends on: turn one query
//! string into one answer string, against whatever corpus the implementation
//! has been given.

use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while generating an answer
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Corpus unavailable: {0}")]
    CorpusUnavailable(String),

    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Other error: {0}")]
    Other(String),
}

impl GenerationError {
    pub fn is_corpus_unavailable(&self) -> bool {
        matches!(self, GenerationError::CorpusUnavailable(_))
    }
}

/// Generates an answer for a single query
///
/// Implementations may be slow or blocking on the network; callers decide
/// whether to run several calls concurrently and whether to bound them with
/// a timeout.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, query: &str) -> Result<String, GenerationError>;
}
