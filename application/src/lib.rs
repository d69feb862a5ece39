//! Application layer for consensus-rag
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    answer_generator::{AnswerGenerator, GenerationError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    document_loader::{ChunkSplitter, CorpusError, DocumentLoader},
    embedder::{Embedder, EmbeddingError},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, ProgressNotifier},
    vector_index::VectorIndex,
};
pub use use_cases::index_document::{
    IndexDocumentError, IndexDocumentInput, IndexDocumentUseCase, IndexReport,
};
pub use use_cases::retrieval_qa::{RetrievalQaError, RetrievalQaUseCase};
pub use use_cases::run_consensus::{RunConsensusError, RunConsensusInput, RunConsensusUseCase};
