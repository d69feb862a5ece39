//! Vector index port
//!
//! Stores embedded chunks and answers nearest-neighbour queries.

use rag_domain::{Chunk, ScoredChunk};

/// Similarity index over embedded chunks
///
/// Implementations use interior mutability so one index can be shared
/// between the indexing and the question-answering use cases.
pub trait VectorIndex: Send + Sync {
    /// Add chunks with their embeddings
    fn insert(&self, entries: Vec<(Chunk, Vec<f32>)>);

    /// Swap the whole contents for `entries` in one step
    ///
    /// Concurrent searches see either the old contents or the new ones,
    /// never an empty or partial index.
    fn replace(&self, entries: Vec<(Chunk, Vec<f32>)>);

    /// Up to `k` chunks most similar to `embedding`, best first
    fn search(&self, embedding: &[f32], k: usize) -> Vec<ScoredChunk>;

    /// Remove every entry
    fn clear(&self);

    /// Number of indexed chunks
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
