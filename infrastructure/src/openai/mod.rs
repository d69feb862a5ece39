//! OpenAI-compatible HTTP adapters
//!
//! - [`OpenAiClient`]: shared `reqwest` client, base URL and bearer key
//! - [`OpenAiEmbedder`]: `/v1/embeddings` behind the `Embedder` port
//! - [`OpenAiLlmGateway`]: `/v1/chat/completions` behind the `LlmGateway` port

pub mod client;
pub mod embedder;
pub mod error;
pub mod gateway;
mod wire;

pub use client::OpenAiClient;
pub use embedder::OpenAiEmbedder;
pub use error::OpenAiError;
pub use gateway::{OpenAiLlmGateway, OpenAiSession};
