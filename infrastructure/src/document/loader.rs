//! Loads PDF and UTF-8 text documents from disk

use rag_application::ports::document_loader::{CorpusError, DocumentLoader};
use rag_domain::Document;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Reads a single document from the local file system
///
/// Files with a `.pdf` extension or a PDF header go through `pdf-extract`;
/// everything else must be UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDocumentLoader;

impl FileDocumentLoader {
    pub fn new() -> Self {
        Self
    }

    fn is_pdf(path: &Path, bytes: &[u8]) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
            || bytes.starts_with(PDF_MAGIC)
    }

    fn extract_pdf(path: &Path, bytes: &[u8]) -> Result<(String, usize), CorpusError> {
        let extraction_error = |message: String| CorpusError::Extraction {
            path: path.to_path_buf(),
            message,
        };

        // pdf-extract panics on some malformed inputs
        let pages = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|_| extraction_error("PDF parser panicked".to_string()))?
        .map_err(|e| extraction_error(e.to_string()))?;

        let page_count = pages.len().max(1);
        Ok((pages.join("\n"), page_count))
    }
}

impl DocumentLoader for FileDocumentLoader {
    fn load(&self, path: &Path) -> Result<Document, CorpusError> {
        let bytes = std::fs::read(path).map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let (text, page_count) = if Self::is_pdf(path, &bytes) {
            Self::extract_pdf(path, &bytes)?
        } else {
            let text = String::from_utf8(bytes).map_err(|e| CorpusError::Extraction {
                path: path.to_path_buf(),
                message: format!("not valid UTF-8 text: {}", e.utf8_error()),
            })?;
            (text, 1)
        };

        debug!(
            "Loaded {} ({} pages, {} chars)",
            source,
            page_count,
            text.chars().count()
        );
        Ok(Document::new(source, text).with_page_count(page_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.txt");
        std::fs::write(&path, "Refunds are issued within 30 days.").unwrap();

        let document = FileDocumentLoader::new().load(&path).unwrap();

        assert_eq!(document.source, "policy.txt");
        assert_eq!(document.text, "Refunds are issued within 30 days.");
        assert_eq!(document.page_count, 1);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileDocumentLoader::new()
            .load(&dir.path().join("missing.pdf"))
            .unwrap_err();
        assert!(matches!(err, CorpusError::Read { .. }));
    }

    #[test]
    fn test_binary_text_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = FileDocumentLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, CorpusError::Extraction { .. }));
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, "this is not a pdf").unwrap();

        let err = FileDocumentLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, CorpusError::Extraction { .. }));
    }

    #[test]
    fn test_pdf_detection() {
        assert!(FileDocumentLoader::is_pdf(Path::new("a.PDF"), b""));
        assert!(FileDocumentLoader::is_pdf(Path::new("upload"), b"%PDF-1.7"));
        assert!(!FileDocumentLoader::is_pdf(Path::new("notes.md"), b"# Notes"));
    }
}
