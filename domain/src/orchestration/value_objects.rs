//! Orchestration value objects - immutable result types.

use crate::document::entities::ScoredChunk;
use serde::{Deserialize, Serialize};

/// Answer produced by the retrieval chain for one query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalAnswer {
    /// The query that was answered
    pub question: String,
    /// The generated answer
    pub answer: String,
    /// Chunks that were placed in the prompt, most similar first
    #[serde(default)]
    pub sources: Vec<ScoredChunk>,
}

impl RetrievalAnswer {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        sources: Vec<ScoredChunk>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            sources,
        }
    }

    /// Indices of the source chunks, in retrieval order
    pub fn source_indices(&self) -> Vec<usize> {
        self.sources.iter().map(|s| s.chunk.index).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::entities::Chunk;

    #[test]
    fn test_source_indices() {
        let answer = RetrievalAnswer::new(
            "q",
            "a",
            vec![
                ScoredChunk::new(Chunk::new(4, "d", "x"), 0.8),
                ScoredChunk::new(Chunk::new(1, "d", "y"), 0.5),
            ],
        );
        assert_eq!(answer.source_indices(), vec![4, 1]);
    }
}
