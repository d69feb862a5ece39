//! CLI entrypoint for consensus-rag
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use rag_application::{
    ConversationLogger, Embedder, ExecutionParams, IndexDocumentInput, IndexDocumentUseCase,
    NoConversationLogger, NoProgress, ProgressNotifier, RetrievalQaUseCase, RunConsensusInput,
    RunConsensusUseCase, VectorIndex,
};
use rag_domain::{OutputFormat, Question};
use rag_infrastructure::{
    ConfigLoader, EmbeddingProvider, FileConfig, FileDocumentLoader, HashEmbedder,
    InMemoryVectorIndex, JsonlConversationLogger, OpenAiClient, OpenAiEmbedder, OpenAiLlmGateway,
    TextChunkSplitter,
};
use rag_presentation::{ChatRepl, Cli, ConsoleFormatter, EmbedderChoice, ProgressReporter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let execution = apply_overrides(&cli, &config);

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting consensus-rag");

    let Some(document) = cli.document.clone() else {
        bail!("A document is required");
    };
    if !cli.chat && cli.question.is_none() {
        bail!("Question is required. Use --chat for interactive mode.");
    }

    // === Dependency Injection ===
    let client = Arc::new(
        OpenAiClient::from_env(
            config.llm.base_url.clone(),
            &config.llm.api_key_env,
            config.llm.timeout_secs.map(std::time::Duration::from_secs),
        )
        .context("Cannot create the OpenAI client")?,
    );

    let embedder = build_embedder(&cli, &config, &client)?;
    let index: Arc<dyn VectorIndex> = Arc::new(InMemoryVectorIndex::new());
    let gateway = Arc::new(
        OpenAiLlmGateway::new(Arc::clone(&client), config.llm.model.clone())
            .with_temperature(config.llm.temperature),
    );
    let splitter = TextChunkSplitter::new(config.chunking)
        .context("Invalid chunking configuration")?;
    let logger = conversation_logger(&cli, &config);

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    // Index the document
    let indexer = IndexDocumentUseCase::new(
        Arc::new(FileDocumentLoader::new()),
        Arc::new(splitter),
        Arc::clone(&embedder),
        Arc::clone(&index),
    )
    .with_conversation_logger(Arc::clone(&logger));

    let input =
        IndexDocumentInput::new(&document).with_batch_size(execution.embedding_batch_size);
    let report = indexer
        .execute_with_progress(input, progress.as_ref())
        .await
        .with_context(|| format!("Cannot index {}", document.display()))?;

    if !cli.quiet {
        eprintln!("{}", ConsoleFormatter::format_index_report(&report));
    }

    let retrieval = Arc::new(
        RetrievalQaUseCase::new(embedder, index, gateway)
            .with_top_k(execution.top_k)
            .with_conversation_logger(Arc::clone(&logger)),
    );
    let consensus = RunConsensusUseCase::new(retrieval.clone()).with_conversation_logger(logger);

    let format = config
        .output
        .resolve_format(cli.output.map(OutputFormat::from));

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(retrieval, consensus)
            .with_execution(execution)
            .with_consensus(cli.consensus || config.repl.consensus)
            .with_format(format)
            .with_progress(!cli.quiet && config.repl.show_progress)
            .with_history_file(config.repl.history_file.as_deref().map(expand_home));
        if let Some(show) = config.repl.show_sources {
            repl = repl.with_show_sources(show);
        }

        repl.run().await?;
        return Ok(());
    }

    let Some(question) = cli.question else {
        bail!("Question is required. Use --chat for interactive mode.");
    };
    let question = Question::new(question);

    let output = if cli.consensus {
        let token = CancellationToken::new();
        let watcher = tokio::spawn({
            let token = token.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            }
        });

        let input = RunConsensusInput::new(question)
            .with_execution(execution)
            .with_cancellation(token);
        let result = consensus
            .execute_with_progress(input, progress.as_ref())
            .await;
        watcher.abort();

        ConsoleFormatter::format_consensus(&result?, format)
    } else {
        let answer = tokio::select! {
            answer = retrieval.answer_with_progress(&question, progress.as_ref()) => answer?,
            _ = tokio::signal::ctrl_c() => bail!("Interrupted"),
        };
        ConsoleFormatter::format_retrieval(&answer, format)
    };

    println!("{}", output);

    Ok(())
}

/// Stderr logging filtered by `-v`, plus optional daily log files.
///
/// `RUST_LOG` takes precedence over the verbosity flag when set.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "consensus-rag.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        if let Some(path) = &cli.config
            && !path.exists()
        {
            bail!("Config file not found: {}", path.display());
        }
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue);
    }
    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(ToString::to_string)
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }

    Ok(config)
}

/// Command-line flags win over every config source.
fn apply_overrides(cli: &Cli, config: &FileConfig) -> ExecutionParams {
    let mut execution = config.execution_params();
    if let Some(k) = cli.top_k {
        execution = execution.with_top_k(k.max(1));
    }
    if cli.sequential {
        execution = execution.sequential();
    }
    if let Some(secs) = cli.timeout {
        execution = execution.with_call_timeout(Some(std::time::Duration::from_secs(secs)));
    }
    execution
}

fn build_embedder(
    cli: &Cli,
    config: &FileConfig,
    client: &Arc<OpenAiClient>,
) -> Result<Arc<dyn Embedder>> {
    let provider = match cli.embedder {
        Some(EmbedderChoice::Openai) => EmbeddingProvider::OpenAi,
        Some(EmbedderChoice::Hash) => EmbeddingProvider::Hash,
        None => config.embedding.parse_provider().0,
    };

    let embedder: Arc<dyn Embedder> = match provider {
        EmbeddingProvider::OpenAi => Arc::new(OpenAiEmbedder::new(
            Arc::clone(client),
            config.embedding.model.clone(),
        )),
        EmbeddingProvider::Hash => Arc::new(HashEmbedder::new(config.embedding.dimension)?),
    };
    info!("Using {} embeddings", provider.as_str());
    Ok(embedder)
}

fn conversation_logger(cli: &Cli, config: &FileConfig) -> Arc<dyn ConversationLogger> {
    let path = cli
        .conversation_log
        .clone()
        .or_else(|| config.logging.conversation_log.clone());

    match path.and_then(JsonlConversationLogger::new) {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
