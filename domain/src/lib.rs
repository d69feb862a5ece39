//! Domain layer for consensus-rag
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Retrieval
//!
//! A single uploaded [`Document`] is split into [`Chunk`]s, which are embedded
//! and indexed by adapters outside this crate. Retrieved chunks are rendered
//! into a "stuff" prompt by [`PromptTemplate`].
//!
//! ## Consensus
//!
//! A [`Question`] is rephrased into four [`QueryVariant`]s. Each variant is
//! answered independently and the most frequent answer wins:
//!
//! - **Paraphrase**: fixed templates, deterministic, see [`paraphrase`]
//! - **Tally**: exact-string counting in first-occurrence order, see [`AnswerTally`]
//! - **Result**: the winner plus every (variant, answer) pair, see [`ConsensusResult`]

pub mod config;
pub mod consensus;
pub mod core;
pub mod document;
pub mod orchestration;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use consensus::{
    AnswerTally, ConsensusResult, ParaphraseTemplate, QueryVariant, VARIANT_COUNT, VariantAnswer,
    paraphrase,
};
pub use core::{error::DomainError, question::Question};
pub use document::{Chunk, ChunkingConfig, Document, ScoredChunk};
pub use orchestration::{Phase, RetrievalAnswer};
pub use prompt::PromptTemplate;
