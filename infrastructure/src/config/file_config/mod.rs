//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod consensus;
mod embedding;
mod llm;
mod logging;
mod output;
mod repl;
mod retrieval;

pub use consensus::FileConsensusConfig;
pub use embedding::{EmbeddingProvider, FileEmbeddingConfig};
pub use llm::FileLlmConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use retrieval::FileRetrievalConfig;

use rag_application::ExecutionParams;
use rag_domain::{ChunkingConfig, ConfigIssue};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat model settings
    pub llm: FileLlmConfig,
    /// Embedding settings
    pub embedding: FileEmbeddingConfig,
    /// Chunk size and overlap
    pub chunking: ChunkingConfig,
    /// Retrieval depth
    pub retrieval: FileRetrievalConfig,
    /// Paraphrase consensus settings
    pub consensus: FileConsensusConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Conversation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. Errors should
    /// abort startup; warnings are only reported.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.llm.validate());
        issues.extend(self.embedding.validate());
        issues.extend(retrieval::validate_chunking(&self.chunking));
        issues.extend(self.retrieval.validate());

        issues
    }

    /// Execution parameters for the use cases
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_top_k(self.retrieval.top_k)
            .with_embedding_batch_size(self.embedding.batch_size)
            .with_parallel(self.consensus.parallel)
            .with_call_timeout(self.consensus.call_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rag_domain::{ConfigIssueCode, OutputFormat};
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[llm]
model = "gpt-4o-mini"
temperature = 0.2
timeout_secs = 30

[embedding]
provider = "hash"
dimension = 128

[chunking]
chunk_size = 500
chunk_overlap = 50

[retrieval]
top_k = 6

[consensus]
parallel = false
call_timeout_secs = 90

[output]
format = "full"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/consensus-rag/history.txt"

[logging]
conversation_log = "/tmp/rag.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.timeout_secs, Some(30));
        assert_eq!(config.embedding.parse_provider().0, EmbeddingProvider::Hash);
        assert_eq!(config.embedding.dimension, 128);
        assert_eq!(config.chunking, ChunkingConfig::new(500, 50));
        assert_eq!(config.retrieval.top_k, 6);
        assert!(!config.consensus.parallel);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert!(config.logging.conversation_log.is_some());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[retrieval]
top_k = 2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.retrieval.top_k, 2);
        // Defaults should apply
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert_eq!(config.chunking, ChunkingConfig::default());
        assert!(config.consensus.parallel);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.llm.temperature, 0.0);
        assert_eq!(config.embedding.model, "text-embedding-ada-002");
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.retrieval.top_k, 4);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let toml_str = r#"
[embedding]
provider = "faiss"

[chunking]
chunk_size = 100
chunk_overlap = 100

[retrieval]
top_k = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let codes: Vec<_> = config.validate().into_iter().map(|i| i.code).collect();

        assert_eq!(codes.len(), 3);
        assert!(codes.contains(&ConfigIssueCode::InvalidChunking));
        assert!(codes.contains(&ConfigIssueCode::ZeroTopK));
    }

    #[test]
    fn test_execution_params() {
        let mut config = FileConfig::default();
        config.retrieval.top_k = 3;
        config.consensus.parallel = false;
        config.consensus.call_timeout_secs = Some(10);

        let params = config.execution_params();
        assert_eq!(params.top_k, 3);
        assert_eq!(params.embedding_batch_size, 64);
        assert!(!params.parallel);
        assert_eq!(params.call_timeout, Some(Duration::from_secs(10)));
    }
}
