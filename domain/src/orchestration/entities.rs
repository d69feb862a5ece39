//! Orchestration domain entities

use serde::{Deserialize, Serialize};

/// Phase of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Loading, splitting and embedding the document
    Indexing,
    /// Answering a single question through the retrieval chain
    Answering,
    /// Answering every paraphrase and voting
    Consensus,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Indexing => "indexing",
            Phase::Answering => "answering",
            Phase::Consensus => "consensus",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Indexing => "Indexing Document",
            Phase::Answering => "Retrieval Answer",
            Phase::Consensus => "Paraphrase Consensus",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
