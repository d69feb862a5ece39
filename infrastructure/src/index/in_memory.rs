//! Flat in-memory vector index
//!
//! Exhaustive cosine-similarity search over every stored chunk. A single
//! uploaded document stays small enough that no approximate structure is
//! needed.

use rag_application::ports::vector_index::VectorIndex;
use rag_domain::{Chunk, ScoredChunk};
use std::cmp::Ordering;
use std::sync::{PoisonError, RwLock};
use tracing::warn;

/// Cosine similarity; 0.0 when either vector has zero norm
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Thread-safe flat index shared by the indexing and answering use cases
#[derive(Debug, Default)]
pub struct InMemoryVectorIndex {
    entries: RwLock<Vec<(Chunk, Vec<f32>)>>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dimension of the stored vectors, if any are stored
    pub fn dimension(&self) -> Option<usize> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .first()
            .map(|(_, v)| v.len())
    }
}

impl VectorIndex for InMemoryVectorIndex {
    fn insert(&self, entries: Vec<(Chunk, Vec<f32>)>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(entries);
    }

    fn replace(&self, entries: Vec<(Chunk, Vec<f32>)>) {
        *self.entries.write().unwrap_or_else(PoisonError::into_inner) = entries;
    }

    fn search(&self, embedding: &[f32], k: usize) -> Vec<ScoredChunk> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        let mut scored: Vec<ScoredChunk> = entries
            .iter()
            .filter(|(chunk, vector)| {
                let matches = vector.len() == embedding.len();
                if !matches {
                    warn!(
                        "Skipping chunk {}: dimension {} != query dimension {}",
                        chunk.index,
                        vector.len(),
                        embedding.len()
                    );
                }
                matches
            })
            .map(|(chunk, vector)| {
                ScoredChunk::new(chunk.clone(), cosine_similarity(embedding, vector))
            })
            .collect();

        // Stable sort: equal scores keep insertion order
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        scored
    }

    fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
