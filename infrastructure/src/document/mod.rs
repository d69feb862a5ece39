//! Document ingestion adapters
//!
//! [`FileDocumentLoader`] reads PDFs and plain text from disk and
//! [`TextChunkSplitter`] cuts the text into overlapping chunks.

mod loader;
mod splitter;

pub use loader::FileDocumentLoader;
pub use splitter::TextChunkSplitter;
