//! Document entities

use serde::{Deserialize, Serialize};

/// A loaded source document (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Where the document came from (usually a file path)
    pub source: String,
    /// Extracted plain text
    pub text: String,
    /// Number of pages, 1 for non-paginated formats
    pub page_count: usize,
}

impl Document {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            page_count: 1,
        }
    }

    pub fn with_page_count(mut self, pages: usize) -> Self {
        self.page_count = pages;
        self
    }

    /// Whether the document has no usable text
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Character count of the extracted text
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// A contiguous span of document text sized for retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position in split order (0-based)
    pub index: usize,
    /// Source document of this chunk
    pub source: String,
    /// Chunk text
    pub text: String,
    /// Byte offset of the chunk within the document text
    pub offset: usize,
}

impl Chunk {
    pub fn new(index: usize, source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            index,
            source: source.into(),
            text: text.into(),
            offset: 0,
        }
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// A chunk returned by similarity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    /// Similarity to the query (higher is closer)
    pub score: f32,
}

impl ScoredChunk {
    pub fn new(chunk: Chunk, score: f32) -> Self {
        Self { chunk, score }
    }
}
