//! Output formatter trait

use rag_application::IndexReport;
use rag_domain::{ConsensusResult, OutputFormat, RetrievalAnswer};

/// Trait for formatting answers in one of the [`OutputFormat`]s
pub trait OutputFormatter {
    /// Format a single retrieval answer
    fn format_retrieval(&self, answer: &RetrievalAnswer, format: OutputFormat) -> String;

    /// Format a paraphrase consensus result
    fn format_consensus(&self, result: &ConsensusResult, format: OutputFormat) -> String;

    /// One-line summary of an indexed document
    fn format_index_report(&self, report: &IndexReport) -> String;
}
