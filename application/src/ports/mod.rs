//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod answer_generator;
pub mod conversation_logger;
pub mod document_loader;
pub mod embedder;
pub mod llm_gateway;
pub mod progress;
pub mod vector_index;
