//! Document ingestion ports
//!
//! [`DocumentLoader`] turns a file into plain text and [`ChunkSplitter`]
//! turns that text into an ordered sequence of retrievable chunks.

use rag_domain::{Chunk, Document};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons a document cannot become a corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract text from {path}: {message}")]
    Extraction { path: PathBuf, message: String },

    #[error("Document {0} contains no text")]
    EmptyDocument(String),

    #[error("Document {0} produced no chunks")]
    NoChunks(String),
}

/// Loads a document from disk
pub trait DocumentLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Document, CorpusError>;
}

/// Splits a document into chunks, in document order
pub trait ChunkSplitter: Send + Sync {
    fn split(&self, document: &Document) -> Vec<Chunk>;
}
