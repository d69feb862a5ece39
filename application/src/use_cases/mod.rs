//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod index_document;
pub mod retrieval_qa;
pub mod run_consensus;
