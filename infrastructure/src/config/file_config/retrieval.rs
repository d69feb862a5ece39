//! Retrieval configuration from TOML (`[chunking]` and `[retrieval]` sections)

use rag_domain::{ChunkingConfig, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw retrieval configuration from TOML
///
/// # Example
///
/// ```toml
/// [retrieval]
/// top_k = 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// Chunks placed in each answer prompt
    pub top_k: usize,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

impl FileRetrievalConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.top_k == 0 {
            vec![ConfigIssue::error(
                ConfigIssueCode::ZeroTopK,
                "retrieval.top_k must be at least 1",
            )]
        } else {
            Vec::new()
        }
    }
}

/// Validate the `[chunking]` section
pub fn validate_chunking(chunking: &ChunkingConfig) -> Vec<ConfigIssue> {
    match chunking.validate() {
        Ok(()) => Vec::new(),
        Err(e) => vec![ConfigIssue::error(
            ConfigIssueCode::InvalidChunking,
            format!("chunking: {}", e),
        )],
    }
}
