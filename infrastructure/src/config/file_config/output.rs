//! `[output]` section: how answers are printed

use rag_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Answer rendering settings as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// `answer`, `full` or `json`; `-o` on the command line wins
    pub format: Option<OutputFormat>,
    /// ANSI colors in console output
    pub color: bool,
}

impl FileOutputConfig {
    /// Format to print with: the command-line choice, then this section, then `answer`
    pub fn resolve_format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.or(self.format).unwrap_or_default()
    }
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}
