//! Console output formatter for retrieval and consensus results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use rag_application::IndexReport;
use rag_domain::util::{single_line, truncate_str};
use rag_domain::{ConsensusResult, OutputFormat, RetrievalAnswer, ScoredChunk};

const PREVIEW_BYTES: usize = 100;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    // ==================== Retrieval ====================

    pub fn format_retrieval(answer: &RetrievalAnswer, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => Self::answer_only(&answer.answer),
            OutputFormat::Full => Self::format_retrieval_full(answer),
            OutputFormat::Json => Self::to_json(answer),
        }
    }

    /// Answer plus the chunks that were in the prompt
    pub fn format_retrieval_full(answer: &RetrievalAnswer) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Answer"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            answer.question
        ));
        output.push_str(&answer.answer);
        output.push('\n');

        output.push_str(&Self::format_sources(&answer.sources));
        output.push_str(&Self::footer());
        output
    }

    /// Numbered one-line previews of retrieved chunks
    pub fn format_sources(sources: &[ScoredChunk]) -> String {
        let mut output = Self::section_header("Sources");
        if sources.is_empty() {
            output.push_str(&format!("{}\n", "(no context retrieved)".dimmed()));
            return output;
        }

        for (rank, source) in sources.iter().enumerate() {
            let preview = single_line(&source.chunk.text);
            let clipped = truncate_str(&preview, PREVIEW_BYTES);
            let ellipsis = if clipped.len() < preview.len() { "..." } else { "" };
            output.push_str(&format!(
                "{} {} {}\n    {}{}\n",
                format!("[{}]", rank + 1).yellow().bold(),
                format!("{} #{}", source.chunk.source, source.chunk.index).bold(),
                format!("(score {:.3})", source.score).dimmed(),
                clipped,
                ellipsis
            ));
        }
        output
    }

    // ==================== Consensus ====================

    pub fn format_consensus(result: &ConsensusResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => Self::answer_only(&result.answer),
            OutputFormat::Full => Self::format_consensus_full(result),
            OutputFormat::Json => Self::to_json(result),
        }
    }

    /// Selected answer, each variant with its answer, and the vote tally
    pub fn format_consensus_full(result: &ConsensusResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Paraphrase Consensus"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            result.question
        ));

        output.push_str(&Self::section_header("Variants"));
        for (i, pair) in result.pairs.iter().enumerate() {
            let marker = if pair.answer == result.answer {
                "*".green().bold()
            } else {
                " ".normal()
            };
            output.push_str(&format!(
                "\n{} {}\n{}\n",
                marker,
                format!("── {}. {} ──", i + 1, pair.variant.text).yellow().bold(),
                Self::indent(&pair.answer, "  ")
            ));
        }

        output.push_str(&Self::section_header("Tally"));
        let tally = result.tally();
        for (answer, count) in tally.entries() {
            output.push_str(&format!(
                "  {}/{}  {}\n",
                count,
                tally.total(),
                truncate_str(&single_line(answer), PREVIEW_BYTES)
            ));
        }

        output.push_str(&Self::section_header("Selected Answer"));
        output.push_str(&format!(
            "{}\n\n{}\n",
            format!("Agreement: {}", result.agreement_summary())
                .green()
                .bold(),
            result.answer
        ));

        output.push_str(&Self::footer());
        output
    }

    // ==================== Index ====================

    pub fn format_index_report(report: &IndexReport) -> String {
        format!(
            "{} {} ({} {}, {} chunks)",
            "Indexed".green().bold(),
            report.source.bold(),
            report.page_count,
            if report.page_count == 1 { "page" } else { "pages" },
            report.chunk_count
        )
    }

    // ==================== Helpers ====================

    fn answer_only(answer: &str) -> String {
        answer.trim_end().to_string()
    }

    fn to_json<T: serde::Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_retrieval(&self, answer: &RetrievalAnswer, format: OutputFormat) -> String {
        Self::format_retrieval(answer, format)
    }

    fn format_consensus(&self, result: &ConsensusResult, format: OutputFormat) -> String {
        Self::format_consensus(result, format)
    }

    fn format_index_report(&self, report: &IndexReport) -> String {
        Self::format_index_report(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rag_domain::{Chunk, Question, VariantAnswer, paraphrase};

    fn consensus(answers: [&str; 4]) -> ConsensusResult {
        let question = Question::new("the notice period");
        let pairs = paraphrase(&question)
            .into_iter()
            .zip(answers)
            .map(|(v, a)| VariantAnswer::new(v, a))
            .collect();
        ConsensusResult::select(question, pairs).unwrap()
    }

    fn retrieval() -> RetrievalAnswer {
        RetrievalAnswer::new(
            "How long is the notice period?",
            "Thirty days.\n",
            vec![ScoredChunk::new(
                Chunk::new(3, "contract.pdf", "The notice period is\nthirty days."),
                0.91,
            )],
        )
    }

    #[test]
    fn test_answer_format_is_plain_answer() {
        assert_eq!(
            ConsoleFormatter::format_retrieval(&retrieval(), OutputFormat::Answer),
            "Thirty days."
        );
        assert_eq!(
            ConsoleFormatter::format_consensus(
                &consensus(["30 days", "1 month", "30 days", "4 weeks"]),
                OutputFormat::Answer
            ),
            "30 days"
        );
    }

    #[test]
    fn test_full_retrieval_lists_sources() {
        let output = ConsoleFormatter::format_retrieval(&retrieval(), OutputFormat::Full);
        assert!(output.contains("How long is the notice period?"));
        assert!(output.contains("contract.pdf #3"));
        assert!(output.contains("The notice period is thirty days."));
    }

    #[test]
    fn test_full_consensus_shows_every_variant_and_agreement() {
        let output = ConsoleFormatter::format_consensus(
            &consensus(["30 days", "1 month", "30 days", "4 weeks"]),
            OutputFormat::Full,
        );
        assert!(output.contains("Explain this: the notice period"));
        assert!(output.contains("What is meant by the notice period?"));
        assert!(output.contains("Give details about the notice period"));
        assert!(output.contains("1 month"));
        assert!(output.contains("Agreement: 2/4"));
        assert!(output.contains("2/4  30 days"));
        assert!(!output.contains("Sources"));
    }

    #[test]
    fn test_json_round_trips() {
        let result = consensus(["A", "B", "B", "A"]);
        let json = ConsoleFormatter::format_consensus(&result, OutputFormat::Json);
        let parsed: ConsensusResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
        assert_eq!(parsed.answer, "A");
    }

    #[test]
    fn test_source_preview_is_truncated() {
        let long = "word ".repeat(100);
        let output = ConsoleFormatter::format_sources(&[ScoredChunk::new(
            Chunk::new(0, "a.txt", long),
            0.5,
        )]);
        assert!(output.contains("..."));
    }

    #[test]
    fn test_index_report() {
        let report = IndexReport {
            source: "manual.pdf".to_string(),
            page_count: 1,
            char_count: 2048,
            chunk_count: 3,
        };
        let line = ConsoleFormatter::format_index_report(&report);
        assert!(line.contains("1 page,"));
        assert!(line.contains("3 chunks"));
    }
}
