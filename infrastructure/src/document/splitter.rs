//! Character-based chunk splitter backed by `text-splitter`

use rag_application::ports::document_loader::ChunkSplitter;
use rag_domain::{Chunk, ChunkingConfig, Document, DomainError};
use text_splitter::{Characters, ChunkConfig, TextSplitter};

/// Splits text at semantic boundaries (paragraphs, sentences, words) into
/// chunks of at most `chunk_size` characters, with `chunk_overlap` characters
/// shared between neighbours.
pub struct TextChunkSplitter {
    config: ChunkingConfig,
    splitter: TextSplitter<Characters>,
}

impl TextChunkSplitter {
    pub fn new(config: ChunkingConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let chunk_config = ChunkConfig::new(config.chunk_size)
            .with_overlap(config.chunk_overlap)
            .map_err(|e| DomainError::InvalidChunking(e.to_string()))?;

        Ok(Self {
            config,
            splitter: TextSplitter::new(chunk_config),
        })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }
}

impl ChunkSplitter for TextChunkSplitter {
    fn split(&self, document: &Document) -> Vec<Chunk> {
        self.splitter
            .chunk_indices(&document.text)
            .filter(|(_, text)| !text.trim().is_empty())
            .enumerate()
            .map(|(index, (offset, text))| {
                Chunk::new(index, &document.source, text).with_offset(offset)
            })
            .collect()
    }
}
