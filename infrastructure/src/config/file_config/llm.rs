//! Chat model configuration from TOML (`[llm]` section)

use rag_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Chat completion settings
///
/// # Example
///
/// ```toml
/// [llm]
/// model = "gpt-3.5-turbo"
/// temperature = 0.0
/// base_url = "https://api.openai.com"
/// api_key_env = "OPENAI_API_KEY"
/// timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Chat model name
    pub model: String,
    /// Sampling temperature (0.0 keeps answers comparable across variants)
    pub temperature: f32,
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// HTTP timeout for a single request
    pub timeout_secs: Option<u64>,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.0,
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: Some(60),
        }
    }
}

impl FileLlmConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: "llm.model".to_string(),
                },
                "llm.model: model name cannot be empty",
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::TemperatureOutOfRange {
                    value: self.temperature.to_string(),
                },
                format!(
                    "llm.temperature: {} is outside 0.0..=2.0",
                    self.temperature
                ),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FileLlmConfig::default().validate().is_empty());
    }

    #[test]
    fn test_empty_model_and_bad_temperature() {
        let config = FileLlmConfig {
            model: "  ".to_string(),
            temperature: 3.5,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.is_error()));
    }
}
