//! Consensus configuration from TOML (`[consensus]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw consensus configuration from TOML
///
/// # Example
///
/// ```toml
/// [consensus]
/// parallel = true
/// call_timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsensusConfig {
    /// Issue the four variant calls concurrently
    pub parallel: bool,
    /// Upper bound per answer call; unset waits indefinitely
    pub call_timeout_secs: Option<u64>,
}

impl Default for FileConsensusConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            call_timeout_secs: None,
        }
    }
}

impl FileConsensusConfig {
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
