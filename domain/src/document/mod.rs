//! Document domain
//!
//! The uploaded document, the chunks it is split into, and the chunking
//! parameters.

pub mod chunking;
pub mod entities;

pub use chunking::ChunkingConfig;
pub use entities::{Chunk, Document, ScoredChunk};
