//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final answer
    Answer,
    /// Answer, every variant with its answer, the tally and the sources
    Full,
    /// JSON output
    Json,
}

impl From<OutputFormat> for rag_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => rag_domain::OutputFormat::Answer,
            OutputFormat::Full => rag_domain::OutputFormat::Full,
            OutputFormat::Json => rag_domain::OutputFormat::Json,
        }
    }
}

/// Embedding backend selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmbedderChoice {
    /// OpenAI embeddings API
    Openai,
    /// Offline feature hashing (no API key needed for indexing)
    Hash,
}

/// CLI arguments for consensus-rag
#[derive(Parser, Debug)]
#[command(name = "consensus-rag")]
#[command(author, version, about = "Ask questions about a document, with paraphrase consensus")]
#[command(long_about = r#"
consensus-rag indexes a single PDF or text document and answers questions
about it with retrieval-augmented generation.

With --consensus, every question is asked four ways:
1. the question as written
2. "Explain this: <question>"
3. "What is meant by <question>?"
4. "Give details about <question>"
The answer returned most often wins; ties go to the earliest answer.

Configuration files are loaded from (in priority order):
1. --config <path>           Explicit config file
2. ./consensus-rag.toml      Project-level config
3. ~/.config/consensus-rag/config.toml   Global config
4. CONSENSUS_RAG_* environment variables

Example:
  consensus-rag handbook.pdf "How many vacation days do I get?"
  consensus-rag handbook.pdf --consensus -o full "What is the notice period?"
  consensus-rag handbook.pdf --chat
"#)]
pub struct Cli {
    /// Document to index (PDF or UTF-8 text)
    #[arg(required_unless_present = "show_config")]
    pub document: Option<PathBuf>,

    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Answer by paraphrase consensus instead of a single retrieval call
    #[arg(long)]
    pub consensus: bool,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Output format (default: from config, else "answer")
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Number of chunks placed in the prompt
    #[arg(short = 'k', long, value_name = "N")]
    pub top_k: Option<usize>,

    /// Issue consensus calls one after another
    #[arg(long)]
    pub sequential: bool,

    /// Timeout in seconds for each consensus call
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Embedding backend
    #[arg(long, value_enum)]
    pub embedder: Option<EmbedderChoice>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Append a JSONL transcript of answers and votes to this file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_question() {
        let cli = Cli::try_parse_from(["consensus-rag", "manual.pdf", "What is covered?"]).unwrap();
        assert_eq!(cli.document, Some(PathBuf::from("manual.pdf")));
        assert_eq!(cli.question.as_deref(), Some("What is covered?"));
        assert!(!cli.consensus);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_parse_consensus_flags() {
        let cli = Cli::try_parse_from([
            "consensus-rag",
            "--consensus",
            "-o",
            "full",
            "-k",
            "6",
            "--sequential",
            "--timeout",
            "30",
            "--embedder",
            "hash",
            "-vv",
            "doc.txt",
            "q",
        ])
        .unwrap();

        assert!(cli.consensus);
        assert_eq!(cli.output, Some(OutputFormat::Full));
        assert_eq!(cli.top_k, Some(6));
        assert!(cli.sequential);
        assert_eq!(cli.timeout, Some(30));
        assert_eq!(cli.embedder, Some(EmbedderChoice::Hash));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_document_required() {
        assert!(Cli::try_parse_from(["consensus-rag"]).is_err());
        assert!(Cli::try_parse_from(["consensus-rag", "--show-config"]).is_ok());
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        let format: rag_domain::OutputFormat = OutputFormat::Json.into();
        assert_eq!(format, rag_domain::OutputFormat::Json);
    }
}
