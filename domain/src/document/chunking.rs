//! Chunking parameters

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Size and overlap used when splitting a document, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk size
    pub chunk_size: usize,
    /// Characters shared between neighbouring chunks
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.chunk_size == 0 {
            return Err(DomainError::InvalidChunking(
                "chunk_size must be greater than 0".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(DomainError::InvalidChunking(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    /// Rough number of chunks for a text of `char_count` characters
    pub fn estimate_chunks(&self, char_count: usize) -> usize {
        if char_count == 0 {
            return 0;
        }
        let stride = self.chunk_size.saturating_sub(self.chunk_overlap).max(1);
        char_count.div_ceil(stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_recursive_splitter_settings() {
        let config = ChunkingConfig::default();
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.chunk_overlap, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        assert!(ChunkingConfig::new(0, 0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overlap_not_smaller() {
        let err = ChunkingConfig::new(100, 100).validate().unwrap_err();
        assert!(err.to_string().contains("chunk_overlap"));
    }

    #[test]
    fn test_estimate_chunks() {
        let config = ChunkingConfig::new(100, 20);
        assert_eq!(config.estimate_chunks(0), 0);
        assert_eq!(config.estimate_chunks(80), 1);
        assert_eq!(config.estimate_chunks(161), 3);
    }
}
