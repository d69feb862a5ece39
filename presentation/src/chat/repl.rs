//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use colored::Colorize;
use rag_application::{
    ExecutionParams, NoProgress, ProgressNotifier, RetrievalQaError, RetrievalQaUseCase,
    RunConsensusInput, RunConsensusUseCase,
};
use rag_domain::{OutputFormat, Question, RetrievalAnswer};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// What a slash command asks the loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandOutcome {
    Continue,
    Quit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    retrieval: Arc<RetrievalQaUseCase>,
    consensus: RunConsensusUseCase,
    execution: ExecutionParams,
    consensus_mode: bool,
    show_sources: bool,
    format: OutputFormat,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(retrieval: Arc<RetrievalQaUseCase>, consensus: RunConsensusUseCase) -> Self {
        Self {
            retrieval,
            consensus,
            execution: ExecutionParams::default(),
            consensus_mode: false,
            show_sources: false,
            format: OutputFormat::Answer,
            show_progress: true,
            history_file: None,
        }
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }

    /// Start with consensus mode on or off
    pub fn with_consensus(mut self, enabled: bool) -> Self {
        self.consensus_mode = enabled;
        self
    }

    /// Output format for answers. `Full` also turns on source display.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self.show_sources = format == OutputFormat::Full;
        self
    }

    /// Initial `/sources` state, overriding what the format implied
    pub fn with_show_sources(mut self, show: bool) -> Self {
        self.show_sources = show;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Override the history file location
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    fn history_path(&self) -> Option<PathBuf> {
        self.history_file.clone().or_else(|| {
            dirs::data_dir().map(|p| p.join("consensus-rag").join("history.txt"))
        })
    }

    fn build_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = self.history_path() else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("History disabled ({}): {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> io::Result<()> {
        let mut editor = self.build_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(">>".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) == CommandOutcome::Quit {
                            break;
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Ok(Signal::CtrlD) => {
                    println!("Bye!");
                    break;
                }
                Ok(_) => {
                    println!("^C");
                    continue;
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    return Err(err);
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│         Consensus RAG - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Top-k: {}", self.retrieval.top_k());
        println!("Mode:  {}", self.mode_label());
        println!();
        Self::print_commands();
    }

    fn print_commands() {
        println!("Commands:");
        println!("  /consensus        - Toggle paraphrase consensus");
        println!("  /sources          - Toggle source display");
        println!("  /help, /h, /?     - Show this help");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    fn mode_label(&self) -> &'static str {
        if self.consensus_mode {
            "consensus (4 paraphrases)"
        } else {
            "single retrieval"
        }
    }

    fn on_off(flag: bool) -> &'static str {
        if flag { "on" } else { "off" }
    }

    /// Handle slash commands.
    fn handle_command(&mut self, cmd: &str) -> CommandOutcome {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                CommandOutcome::Quit
            }
            "/help" | "/h" | "/?" => {
                println!();
                Self::print_commands();
                CommandOutcome::Continue
            }
            "/consensus" => {
                self.consensus_mode = !self.consensus_mode;
                println!("Mode: {}", self.mode_label());
                CommandOutcome::Continue
            }
            "/sources" => {
                self.show_sources = !self.show_sources;
                println!("Sources: {}", Self::on_off(self.show_sources));
                CommandOutcome::Continue
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                CommandOutcome::Continue
            }
        }
    }

    fn answer_format(&self) -> OutputFormat {
        effective_format(self.format, self.show_sources)
    }

    async fn process_question(&self, question: &str) {
        println!();

        let progress: Box<dyn ProgressNotifier> = if self.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(NoProgress)
        };

        let output = if self.consensus_mode {
            self.ask_consensus(question, progress.as_ref()).await
        } else {
            self.ask_single(question, progress.as_ref()).await
        };

        match output {
            Ok(text) => println!("{}", text),
            Err(message) => eprintln!("{} {}", "Error:".red().bold(), message),
        }
        println!();
    }

    async fn ask_single(
        &self,
        question: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, String> {
        let token = CancellationToken::new();
        let watcher = spawn_interrupt_watcher(token.clone());

        let result =
            answer_until_cancelled(&self.retrieval, &Question::new(question), progress, &token)
                .await;
        watcher.abort();

        match result {
            Some(Ok(answer)) => Ok(ConsoleFormatter::format_retrieval(
                &answer,
                self.answer_format(),
            )),
            Some(Err(RetrievalQaError::CorpusUnavailable(_))) => Err(corpus_hint()),
            Some(Err(e)) => Err(e.to_string()),
            None => Err("Interrupted".to_string()),
        }
    }

    async fn ask_consensus(
        &self,
        question: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, String> {
        let token = CancellationToken::new();
        let watcher = spawn_interrupt_watcher(token.clone());

        let input = RunConsensusInput::new(question)
            .with_execution(self.execution.clone())
            .with_cancellation(token);
        let result = self.consensus.execute_with_progress(input, progress).await;
        watcher.abort();

        match result {
            Ok(result) => Ok(ConsoleFormatter::format_consensus(
                &result,
                self.answer_format(),
            )),
            Err(e) if e.is_corpus_unavailable() => Err(corpus_hint()),
            Err(e) if e.is_cancelled() => Err("Interrupted".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// JSON always wins; otherwise the sources toggle picks full or answer-only.
fn effective_format(format: OutputFormat, show_sources: bool) -> OutputFormat {
    match (format, show_sources) {
        (OutputFormat::Json, _) => OutputFormat::Json,
        (_, true) => OutputFormat::Full,
        (_, false) => OutputFormat::Answer,
    }
}

fn corpus_hint() -> String {
    "No document is indexed; restart with a readable document".to_string()
}

/// Run one retrieval answer; `None` when `token` fires first.
async fn answer_until_cancelled(
    retrieval: &RetrievalQaUseCase,
    question: &Question,
    progress: &dyn ProgressNotifier,
    token: &CancellationToken,
) -> Option<Result<RetrievalAnswer, RetrievalQaError>> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        result = retrieval.answer_with_progress(question, progress) => Some(result),
    }
}

/// Cancel `token` on the first Ctrl-C while a question is in flight.
fn spawn_interrupt_watcher(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rag_application::{
        Embedder, EmbeddingError, GatewayError, LlmGateway, LlmSession, VectorIndex,
    };
    use rag_domain::{Chunk, ScoredChunk};
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct UnitEmbedder;

    #[async_trait]
    impl Embedder for UnitEmbedder {
        async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(texts.iter().map(|_| vec![1.0]).collect())
        }

        async fn embed_query(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(vec![1.0])
        }
    }

    struct OneChunkIndex;

    impl VectorIndex for OneChunkIndex {
        fn insert(&self, _entries: Vec<(Chunk, Vec<f32>)>) {}

        fn replace(&self, _entries: Vec<(Chunk, Vec<f32>)>) {}

        fn search(&self, _embedding: &[f32], _k: usize) -> Vec<ScoredChunk> {
            vec![ScoredChunk::new(Chunk::new(0, "doc.txt", "Returns within 30 days."), 1.0)]
        }

        fn clear(&self) {}

        fn len(&self) -> usize {
            1
        }
    }

    /// Replies after `delay`.
    struct SlowGateway {
        delay: Duration,
    }

    struct SlowSession {
        delay: Duration,
    }

    #[async_trait]
    impl LlmSession for SlowSession {
        fn model(&self) -> &str {
            "slow-model"
        }

        async fn send(&self, _content: &str) -> Result<String, GatewayError> {
            tokio::time::sleep(self.delay).await;
            Ok("30 days".to_string())
        }
    }

    #[async_trait]
    impl LlmGateway for SlowGateway {
        fn model_name(&self) -> &str {
            "slow-model"
        }

        async fn create_session_with_system_prompt(
            &self,
            _system_prompt: &str,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            Ok(Box::new(SlowSession { delay: self.delay }))
        }
    }

    fn retrieval(delay: Duration) -> RetrievalQaUseCase {
        RetrievalQaUseCase::new(
            Arc::new(UnitEmbedder),
            Arc::new(OneChunkIndex),
            Arc::new(SlowGateway { delay }),
        )
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_cancelled_single_answer_returns_without_waiting() {
        let use_case = retrieval(Duration::from_secs(30));
        let token = CancellationToken::new();
        token.cancel();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            answer_until_cancelled(&use_case, &Question::new("refunds?"), &NoProgress, &token),
        )
        .await
        .expect("cancelled answer should return promptly");

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_cancel_during_single_answer() {
        let use_case = retrieval(Duration::from_secs(30));
        let token = CancellationToken::new();
        let canceller = {
            let token = token.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                token.cancel();
            })
        };

        let result =
            answer_until_cancelled(&use_case, &Question::new("refunds?"), &NoProgress, &token)
                .await;
        canceller.await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_uncancelled_single_answer_completes() {
        let use_case = retrieval(Duration::from_millis(1));
        let token = CancellationToken::new();

        let answer =
            answer_until_cancelled(&use_case, &Question::new("refunds?"), &NoProgress, &token)
                .await
                .unwrap()
                .unwrap();

        assert_eq!(answer.answer, "30 days");
        assert_eq!(answer.source_indices(), vec![0]);
    }

    #[test]
    fn test_effective_format() {
        assert_eq!(
            effective_format(OutputFormat::Answer, false),
            OutputFormat::Answer
        );
        assert_eq!(effective_format(OutputFormat::Answer, true), OutputFormat::Full);
        assert_eq!(effective_format(OutputFormat::Full, false), OutputFormat::Answer);
        assert_eq!(effective_format(OutputFormat::Json, true), OutputFormat::Json);
    }

    #[test]
    fn test_show_sources_overrides_format_default() {
        let retrieval = Arc::new(retrieval(Duration::from_millis(1)));
        let consensus = RunConsensusUseCase::new(retrieval.clone());

        let repl = ChatRepl::new(retrieval, consensus)
            .with_format(OutputFormat::Full)
            .with_show_sources(false);

        assert_eq!(repl.answer_format(), OutputFormat::Answer);
    }

    #[tokio::test]
    async fn test_interrupt_watcher_abort_leaves_token_untouched() {
        let token = CancellationToken::new();
        let watcher = spawn_interrupt_watcher(token.clone());
        watcher.abort();
        let _ = watcher.await;
        assert!(!token.is_cancelled());
    }
}
