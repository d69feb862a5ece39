//! Configuration file loading for consensus-rag
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./consensus-rag.toml` or `./.consensus-rag.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/consensus-rag/config.toml`
//! 4. Environment: `CONSENSUS_RAG_*` (`__` separates sections)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    EmbeddingProvider, FileConfig, FileConsensusConfig, FileEmbeddingConfig, FileLlmConfig,
    FileLoggingConfig, FileOutputConfig, FileReplConfig, FileRetrievalConfig,
};
pub use loader::ConfigLoader;
