//! `[repl]` section: defaults for `--chat` sessions

use serde::{Deserialize, Serialize};

/// Chat session settings as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Draw the retrieval/consensus progress bars while a question runs
    pub show_progress: bool,
    /// Where reedline keeps question history; `~` is expanded by the caller
    pub history_file: Option<String>,
    /// Open chat with `/consensus` already on
    pub consensus: bool,
    /// Initial state of `/sources`; unset follows the output format
    pub show_sources: Option<bool>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            consensus: false,
            show_sources: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_defaults() {
        let config = FileReplConfig::default();
        assert!(config.show_progress);
        assert!(!config.consensus);
        assert_eq!(config.show_sources, None);
    }

    #[test]
    fn test_chat_section_overrides() {
        let toml_str = r#"
[repl]
consensus = true
show_sources = false
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.repl.consensus);
        assert_eq!(config.repl.show_sources, Some(false));
        assert!(config.repl.show_progress);
        assert_eq!(config.repl.history_file, None);
    }
}
