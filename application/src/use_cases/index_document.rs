//! Index Document use case
//!
//! Loads the uploaded document, splits it into chunks, embeds the chunks and
//! replaces the contents of the shared [`VectorIndex`].

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::document_loader::{ChunkSplitter, CorpusError, DocumentLoader};
use crate::ports::embedder::{Embedder, EmbeddingError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::vector_index::VectorIndex;
use futures::StreamExt;
use rag_domain::{Chunk, Document, Phase};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Embedding requests kept in flight at once
const MAX_CONCURRENT_BATCHES: usize = 4;

/// Errors that can occur while indexing a document
#[derive(Error, Debug)]
pub enum IndexDocumentError {
    #[error("Corpus unavailable: {0}")]
    CorpusUnavailable(#[from] CorpusError),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Embedder returned {got} vectors for {expected} chunks")]
    EmbeddingCountMismatch { expected: usize, got: usize },

    #[error("Indexing task failed: {0}")]
    TaskFailed(String),
}

/// Input for the [`IndexDocumentUseCase`]
#[derive(Debug, Clone)]
pub struct IndexDocumentInput {
    /// Path of the document to index
    pub path: PathBuf,
    /// Chunks per embedding request
    pub batch_size: usize,
}

impl IndexDocumentInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            batch_size: 64,
        }
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }
}

/// Summary of an indexed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexReport {
    pub source: String,
    pub page_count: usize,
    pub char_count: usize,
    pub chunk_count: usize,
}

/// Use case for turning a document into a searchable corpus
pub struct IndexDocumentUseCase {
    loader: Arc<dyn DocumentLoader>,
    splitter: Arc<dyn ChunkSplitter>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl IndexDocumentUseCase {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        splitter: Arc<dyn ChunkSplitter>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            loader,
            splitter,
            embedder,
            index,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: IndexDocumentInput) -> Result<IndexReport, IndexDocumentError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks.
    ///
    /// The index is only replaced once every chunk has been embedded, so a
    /// failed re-index leaves the previous corpus searchable.
    pub async fn execute_with_progress(
        &self,
        input: IndexDocumentInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<IndexReport, IndexDocumentError> {
        info!("Indexing document {}", input.path.display());

        let (document, chunks) = self.load_and_split(input.path.clone()).await?;
        debug!(
            "Split {} ({} chars) into {} chunks",
            document.source,
            document.char_count(),
            chunks.len()
        );

        let batch_size = input.batch_size.max(1);
        let total_batches = chunks.len().div_ceil(batch_size);
        progress.on_phase_start(&Phase::Indexing, total_batches);

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = match self.embed_all(&texts, batch_size, progress).await {
            Ok(embeddings) => embeddings,
            Err(e) => {
                progress.on_phase_complete(&Phase::Indexing);
                return Err(e);
            }
        };

        let report = IndexReport {
            source: document.source.clone(),
            page_count: document.page_count,
            char_count: document.char_count(),
            chunk_count: chunks.len(),
        };

        self.index
            .replace(chunks.into_iter().zip(embeddings).collect());
        progress.on_phase_complete(&Phase::Indexing);

        info!(
            "Indexed {} chunks from {} ({} pages)",
            report.chunk_count, report.source, report.page_count
        );

        self.conversation_logger.log(ConversationEvent::new(
            "document_indexed",
            serde_json::json!({
                "source": report.source,
                "pages": report.page_count,
                "chars": report.char_count,
                "chunks": report.chunk_count,
            }),
        ));

        Ok(report)
    }

    /// Load and split on the blocking pool; PDF extraction is CPU bound.
    async fn load_and_split(
        &self,
        path: PathBuf,
    ) -> Result<(Document, Vec<Chunk>), IndexDocumentError> {
        let loader = Arc::clone(&self.loader);
        let splitter = Arc::clone(&self.splitter);

        let result = tokio::task::spawn_blocking(move || -> Result<_, CorpusError> {
            let document = loader.load(&path)?;
            if document.is_blank() {
                return Err(CorpusError::EmptyDocument(document.source));
            }
            let chunks = splitter.split(&document);
            if chunks.is_empty() {
                return Err(CorpusError::NoChunks(document.source));
            }
            Ok((document, chunks))
        })
        .await
        .map_err(|e| IndexDocumentError::TaskFailed(e.to_string()))?;

        Ok(result?)
    }

    async fn embed_all(
        &self,
        texts: &[String],
        batch_size: usize,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Vec<f32>>, IndexDocumentError> {
        let mut embeddings = Vec::with_capacity(texts.len());

        // `buffered` yields results in batch order even when requests overlap
        let mut batches = futures::stream::iter(texts.chunks(batch_size))
            .map(|batch| async move { (batch.len(), self.embedder.embed_documents(batch).await) })
            .buffered(MAX_CONCURRENT_BATCHES);

        while let Some((expected, result)) = batches.next().await {
            let vectors = match result {
                Ok(vectors) => vectors,
                Err(e) => {
                    progress.on_task_complete(&Phase::Indexing, "embedding batch", false);
                    return Err(e.into());
                }
            };
            if vectors.len() != expected {
                return Err(IndexDocumentError::EmbeddingCountMismatch {
                    expected,
                    got: vectors.len(),
                });
            }
            embeddings.extend(vectors);
            progress.on_task_complete(
                &Phase::Indexing,
                &format!("{}/{} chunks", embeddings.len(), texts.len()),
                true,
            );
        }

        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rag_domain::ScoredChunk;
    use std::path::Path;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct MockLoader {
        text: String,
    }

    impl DocumentLoader for MockLoader {
        fn load(&self, path: &Path) -> Result<Document, CorpusError> {
            Ok(Document::new(path.display().to_string(), self.text.clone()).with_page_count(2))
        }
    }

    struct FailingLoader;

    impl DocumentLoader for FailingLoader {
        fn load(&self, path: &Path) -> Result<Document, CorpusError> {
            Err(CorpusError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
        }
    }

    /// Splits on blank lines.
    struct ParagraphSplitter;

    impl ChunkSplitter for ParagraphSplitter {
        fn split(&self, document: &Document) -> Vec<Chunk> {
            document
                .text
                .split("\n\n")
                .filter(|p| !p.trim().is_empty())
                .enumerate()
                .map(|(i, p)| Chunk::new(i, &document.source, p))
                .collect()
        }
    }

    /// Embeds each text as [len, 1.0] and records batch sizes.
    struct LengthEmbedder {
        batches: Mutex<Vec<usize>>,
        drop_one: bool,
    }

    impl LengthEmbedder {
        fn new() -> Self {
            Self {
                batches: Mutex::new(Vec::new()),
                drop_one: false,
            }
        }
    }

    #[async_trait]
    impl Embedder for LengthEmbedder {
        async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            self.batches.lock().unwrap().push(texts.len());
            let mut vectors: Vec<Vec<f32>> =
                texts.iter().map(|t| vec![t.len() as f32, 1.0]).collect();
            if self.drop_one {
                vectors.pop();
            }
            Ok(vectors)
        }

        async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(vec![text.len() as f32, 1.0])
        }
    }

    #[derive(Default)]
    struct RecordingIndex {
        entries: Mutex<Vec<(Chunk, Vec<f32>)>>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl VectorIndex for RecordingIndex {
        fn insert(&self, entries: Vec<(Chunk, Vec<f32>)>) {
            self.calls.lock().unwrap().push("insert");
            self.entries.lock().unwrap().extend(entries);
        }

        fn replace(&self, entries: Vec<(Chunk, Vec<f32>)>) {
            self.calls.lock().unwrap().push("replace");
            *self.entries.lock().unwrap() = entries;
        }

        fn search(&self, _embedding: &[f32], k: usize) -> Vec<ScoredChunk> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .take(k)
                .map(|(c, _)| ScoredChunk::new(c.clone(), 1.0))
                .collect()
        }

        fn clear(&self) {
            self.calls.lock().unwrap().push("clear");
            self.entries.lock().unwrap().clear();
        }

        fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    fn use_case(
        loader: Arc<dyn DocumentLoader>,
        embedder: Arc<LengthEmbedder>,
        index: Arc<RecordingIndex>,
    ) -> IndexDocumentUseCase {
        IndexDocumentUseCase::new(loader, Arc::new(ParagraphSplitter), embedder, index)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_indexes_all_chunks_in_order() {
        let loader = Arc::new(MockLoader {
            text: "alpha\n\nbeta\n\ngamma".to_string(),
        });
        let embedder = Arc::new(LengthEmbedder::new());
        let index = Arc::new(RecordingIndex::default());

        let report = use_case(loader, embedder.clone(), index.clone())
            .execute(IndexDocumentInput::new("manual.txt").with_batch_size(2))
            .await
            .unwrap();

        assert_eq!(report.chunk_count, 3);
        assert_eq!(report.page_count, 2);
        assert_eq!(report.source, "manual.txt");
        assert_eq!(*embedder.batches.lock().unwrap(), vec![2, 1]);

        let entries = index.entries.lock().unwrap();
        let texts: Vec<_> = entries.iter().map(|(c, _)| c.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha", "beta", "gamma"]);
        assert_eq!(entries[1].1, vec![4.0, 1.0]);
    }

    #[tokio::test]
    async fn test_reindex_replaces_previous_corpus() {
        let embedder = Arc::new(LengthEmbedder::new());
        let index = Arc::new(RecordingIndex::default());

        let first = Arc::new(MockLoader {
            text: "one\n\ntwo".to_string(),
        });
        use_case(first, embedder.clone(), index.clone())
            .execute(IndexDocumentInput::new("a.txt"))
            .await
            .unwrap();

        let second = Arc::new(MockLoader {
            text: "three".to_string(),
        });
        use_case(second, embedder, index.clone())
            .execute(IndexDocumentInput::new("b.txt"))
            .await
            .unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(*index.calls.lock().unwrap(), vec!["replace", "replace"]);
    }

    #[tokio::test]
    async fn test_blank_document_is_corpus_unavailable() {
        let loader = Arc::new(MockLoader {
            text: "   \n  ".to_string(),
        });
        let index = Arc::new(RecordingIndex::default());

        let err = use_case(loader, Arc::new(LengthEmbedder::new()), index.clone())
            .execute(IndexDocumentInput::new("blank.pdf"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            IndexDocumentError::CorpusUnavailable(CorpusError::EmptyDocument(_))
        ));
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_document_is_corpus_unavailable() {
        let err = use_case(
            Arc::new(FailingLoader),
            Arc::new(LengthEmbedder::new()),
            Arc::new(RecordingIndex::default()),
        )
        .execute(IndexDocumentInput::new("missing.pdf"))
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            IndexDocumentError::CorpusUnavailable(CorpusError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn test_embedding_count_mismatch_keeps_old_index() {
        let index = Arc::new(RecordingIndex::default());
        index.insert(vec![(Chunk::new(0, "old.txt", "old"), vec![1.0])]);

        let embedder = Arc::new(LengthEmbedder {
            batches: Mutex::new(Vec::new()),
            drop_one: true,
        });
        let loader = Arc::new(MockLoader {
            text: "a\n\nb".to_string(),
        });

        let err = use_case(loader, embedder, index.clone())
            .execute(IndexDocumentInput::new("new.txt"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            IndexDocumentError::EmbeddingCountMismatch {
                expected: 2,
                got: 1
            }
        ));
        assert_eq!(index.len(), 1);
    }
}
