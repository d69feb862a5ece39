//! Embedding configuration from TOML (`[embedding]` section)

use rag_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which embedder backs the vector index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// OpenAI `/v1/embeddings`
    #[default]
    OpenAi,
    /// Offline feature-hashing embedder
    Hash,
}

impl EmbeddingProvider {
    pub const VALID_VALUES: [&'static str; 2] = ["openai", "hash"];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingProvider::OpenAi => "openai",
            EmbeddingProvider::Hash => "hash",
        }
    }
}

impl FromStr for EmbeddingProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(EmbeddingProvider::OpenAi),
            "hash" | "offline" => Ok(EmbeddingProvider::Hash),
            other => Err(format!("unknown embedding provider '{}'", other)),
        }
    }
}

impl std::fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw embedding configuration from TOML
///
/// # Example
///
/// ```toml
/// [embedding]
/// provider = "openai"      # or "hash" for keyless runs
/// model = "text-embedding-ada-002"
/// dimension = 256          # hash provider only
/// batch_size = 64
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub dimension: usize,
    pub batch_size: usize,
}

impl Default for FileEmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "text-embedding-ada-002".to_string(),
            dimension: 256,
            batch_size: 64,
        }
    }
}

impl FileEmbeddingConfig {
    /// Parse the provider, falling back to OpenAI with an error issue.
    pub fn parse_provider(&self) -> (EmbeddingProvider, Vec<ConfigIssue>) {
        match self.provider.parse() {
            Ok(provider) => (provider, Vec::new()),
            Err(_) => (
                EmbeddingProvider::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "embedding.provider".to_string(),
                        value: self.provider.clone(),
                        valid_values: EmbeddingProvider::VALID_VALUES
                            .iter()
                            .map(|v| v.to_string())
                            .collect(),
                    },
                    format!(
                        "embedding.provider: unknown value '{}' (expected one of: {})",
                        self.provider,
                        EmbeddingProvider::VALID_VALUES.join(", ")
                    ),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (provider, mut issues) = self.parse_provider();

        if provider == EmbeddingProvider::OpenAi && self.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: "embedding.model".to_string(),
                },
                "embedding.model: model name cannot be empty",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider() {
        assert_eq!("OpenAI".parse(), Ok(EmbeddingProvider::OpenAi));
        assert_eq!("hash".parse(), Ok(EmbeddingProvider::Hash));
        assert!("faiss".parse::<EmbeddingProvider>().is_err());
    }

    #[test]
    fn test_unknown_provider_is_error() {
        let config = FileEmbeddingConfig {
            provider: "faiss".to_string(),
            ..Default::default()
        };
        let (provider, issues) = config.parse_provider();
        assert_eq!(provider, EmbeddingProvider::OpenAi);
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0].code,
            ConfigIssueCode::InvalidEnumValue { ref field, .. } if field == "embedding.provider"
        ));
    }

    #[test]
    fn test_hash_provider_ignores_model() {
        let config = FileEmbeddingConfig {
            provider: "hash".to_string(),
            model: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_empty());
    }
}
