//! Infrastructure layer for consensus-rag
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod document;
pub mod embedding;
pub mod index;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigLoader, EmbeddingProvider, FileConfig, FileConsensusConfig, FileEmbeddingConfig,
    FileLlmConfig, FileLoggingConfig, FileOutputConfig, FileReplConfig,
    FileRetrievalConfig,
};
pub use document::{FileDocumentLoader, TextChunkSplitter};
pub use embedding::HashEmbedder;
pub use index::InMemoryVectorIndex;
pub use logging::JsonlConversationLogger;
pub use openai::{OpenAiClient, OpenAiEmbedder, OpenAiError, OpenAiLlmGateway};
