//! Retrieval QA use case
//!
//! Answers one query against the indexed document: embed the query, fetch
//! the `top_k` most similar chunks, stuff them into a single prompt and ask
//! the model.

use crate::ports::answer_generator::{AnswerGenerator, GenerationError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::embedder::{Embedder, EmbeddingError};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::vector_index::VectorIndex;
use async_trait::async_trait;
use rag_domain::{Phase, PromptTemplate, Question, RetrievalAnswer};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while answering from the corpus
#[derive(Error, Debug)]
pub enum RetrievalQaError {
    #[error("Corpus unavailable: {0}")]
    CorpusUnavailable(String),

    #[error("Query embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl From<RetrievalQaError> for GenerationError {
    fn from(err: RetrievalQaError) -> Self {
        match err {
            RetrievalQaError::CorpusUnavailable(msg) => GenerationError::CorpusUnavailable(msg),
            RetrievalQaError::Embedding(e) => GenerationError::Retrieval(e.to_string()),
            RetrievalQaError::Gateway(e) => GenerationError::Gateway(e),
        }
    }
}

/// Use case for answering a single query from the indexed document
pub struct RetrievalQaUseCase {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    gateway: Arc<dyn LlmGateway>,
    top_k: usize,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RetrievalQaUseCase {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        gateway: Arc<dyn LlmGateway>,
    ) -> Self {
        Self {
            embedder,
            index,
            gateway,
            top_k: 4,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Number of chunks placed in the prompt (at least one).
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k.max(1);
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Answer with default (no-op) progress
    pub async fn answer(&self, question: &Question) -> Result<RetrievalAnswer, RetrievalQaError> {
        self.answer_with_progress(question, &NoProgress).await
    }

    /// Answer with progress callbacks
    pub async fn answer_with_progress(
        &self,
        question: &Question,
        progress: &dyn ProgressNotifier,
    ) -> Result<RetrievalAnswer, RetrievalQaError> {
        if self.index.is_empty() {
            return Err(RetrievalQaError::CorpusUnavailable(
                "no document has been indexed".to_string(),
            ));
        }

        progress.on_phase_start(&Phase::Answering, 1);
        let result = self.run(question).await;
        progress.on_task_complete(&Phase::Answering, self.gateway.model_name(), result.is_ok());
        progress.on_phase_complete(&Phase::Answering);

        let answer = result?;
        self.conversation_logger.log(ConversationEvent::new(
            "retrieval_answer",
            serde_json::json!({
                "question": answer.question,
                "answer": answer.answer,
                "model": self.gateway.model_name(),
                "sources": answer.source_indices(),
            }),
        ));
        Ok(answer)
    }

    async fn run(&self, question: &Question) -> Result<RetrievalAnswer, RetrievalQaError> {
        let query = self.embedder.embed_query(question.content()).await?;
        let sources = self.index.search(&query, self.top_k);
        debug!(
            "Retrieved {} chunks for {:?}: {:?}",
            sources.len(),
            question.content(),
            sources.iter().map(|s| s.chunk.index).collect::<Vec<_>>()
        );

        let session = self
            .gateway
            .create_session_with_system_prompt(PromptTemplate::answer_system())
            .await?;
        let prompt = PromptTemplate::answer_prompt(question.content(), &sources);
        let answer = session.send(&prompt).await?;

        info!(
            "Answered {:?} with {} ({} chars)",
            question.content(),
            session.model(),
            answer.len()
        );
        Ok(RetrievalAnswer::new(question.content(), answer, sources))
    }
}

#[async_trait]
impl AnswerGenerator for RetrievalQaUseCase {
    async fn generate(&self, query: &str) -> Result<String, GenerationError> {
        let answer = self.answer(&Question::new(query)).await?;
        Ok(answer.answer)
    }
}
