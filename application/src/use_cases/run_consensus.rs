//! Run Consensus use case
//!
//! Asks the answer generator every paraphrase of a question and selects the
//! most frequent answer.
//!
//! Every variant must produce an answer. The first failure aborts the run and
//! no partial result is returned.

use crate::config::ExecutionParams;
use crate::ports::answer_generator::{AnswerGenerator, GenerationError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use rag_domain::{
    ConsensusResult, Phase, Question, QueryVariant, VARIANT_COUNT, VariantAnswer, paraphrase,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during a consensus run
#[derive(Error, Debug)]
pub enum RunConsensusError {
    #[error("Variant {} ({variant:?}) failed: {source}", .index + 1)]
    GenerationFailure {
        index: usize,
        variant: String,
        #[source]
        source: GenerationError,
    },

    #[error("Variant {} ({variant:?}) timed out after {after:?}", .index + 1)]
    Timeout {
        index: usize,
        variant: String,
        after: Duration,
    },

    #[error("Consensus run cancelled")]
    Cancelled,

    #[error("Answer task failed: {0}")]
    TaskFailed(String),

    #[error("Only {collected} answers were collected")]
    Incomplete { collected: usize },
}

impl RunConsensusError {
    /// Whether the run failed because no document is indexed
    pub fn is_corpus_unavailable(&self) -> bool {
        matches!(
            self,
            RunConsensusError::GenerationFailure { source, .. } if source.is_corpus_unavailable()
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunConsensusError::Cancelled)
    }
}

/// Input for the [`RunConsensusUseCase`]
#[derive(Debug, Clone)]
pub struct RunConsensusInput {
    /// The question to paraphrase
    pub question: Question,
    /// Parallelism and per-call timeout
    pub execution: ExecutionParams,
    /// Cancels in-flight calls when triggered
    pub cancellation: Option<CancellationToken>,
}

impl RunConsensusInput {
    pub fn new(question: impl Into<Question>) -> Self {
        Self {
            question: question.into(),
            execution: ExecutionParams::default(),
            cancellation: None,
        }
    }

    pub fn with_execution(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

/// Use case for paraphrase consensus over an [`AnswerGenerator`]
pub struct RunConsensusUseCase {
    generator: Arc<dyn AnswerGenerator>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunConsensusUseCase {
    pub fn new(generator: Arc<dyn AnswerGenerator>) -> Self {
        Self {
            generator,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunConsensusInput,
    ) -> Result<ConsensusResult, RunConsensusError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunConsensusInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ConsensusResult, RunConsensusError> {
        if input.is_cancelled() {
            return Err(RunConsensusError::Cancelled);
        }

        let variants = paraphrase(&input.question);
        info!(
            "Starting consensus over {} variants ({})",
            variants.len(),
            if input.execution.parallel {
                "parallel"
            } else {
                "sequential"
            }
        );

        progress.on_phase_start(&Phase::Consensus, variants.len());
        let answers = if input.execution.parallel {
            self.collect_parallel(&variants, &input, progress).await
        } else {
            self.collect_sequential(&variants, &input, progress).await
        };
        progress.on_phase_complete(&Phase::Consensus);
        let answers = answers?;

        let collected = answers.len();
        let pairs: Vec<VariantAnswer> = variants
            .into_iter()
            .zip(answers)
            .map(|(variant, answer)| VariantAnswer::new(variant, answer))
            .collect();

        let result = ConsensusResult::select(input.question.content(), pairs)
            .ok_or(RunConsensusError::Incomplete { collected })?;

        info!(
            "Consensus selected an answer with agreement {}",
            result.agreement_summary()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "consensus_result",
            serde_json::json!({
                "question": result.question,
                "answer": result.answer,
                "agreement": result.agreement(),
                "pairs": result.pairs,
            }),
        ));

        Ok(result)
    }

    /// Issue every variant at once; answers are returned in variant order.
    async fn collect_parallel(
        &self,
        variants: &[QueryVariant],
        input: &RunConsensusInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<String>, RunConsensusError> {
        let mut join_set = JoinSet::new();

        for (index, variant) in variants.iter().enumerate() {
            let generator = Arc::clone(&self.generator);
            let variant = variant.clone();
            let timeout = input.execution.call_timeout;

            join_set.spawn(async move {
                let result = call_variant(generator.as_ref(), index, &variant, timeout).await;
                (index, result)
            });
        }

        let mut slots: Vec<Option<String>> = vec![None; variants.len()];

        loop {
            let next = match &input.cancellation {
                Some(token) => tokio::select! {
                    _ = token.cancelled() => {
                        warn!("Consensus cancelled, aborting {} calls", join_set.len());
                        join_set.abort_all();
                        return Err(RunConsensusError::Cancelled);
                    }
                    next = join_set.join_next() => next,
                },
                None => join_set.join_next().await,
            };

            let Some(joined) = next else { break };
            match joined {
                Ok((index, Ok(answer))) => {
                    debug!("Variant {} answered", index + 1);
                    progress.on_task_complete(&Phase::Consensus, label(&variants[index]), true);
                    slots[index] = Some(answer);
                }
                Ok((index, Err(e))) => {
                    warn!("{}", e);
                    progress.on_task_complete(&Phase::Consensus, label(&variants[index]), false);
                    join_set.abort_all();
                    return Err(e);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    join_set.abort_all();
                    return Err(RunConsensusError::TaskFailed(e.to_string()));
                }
            }
        }

        let collected = slots.iter().filter(|s| s.is_some()).count();
        slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(RunConsensusError::Incomplete { collected })
    }

    /// Issue variants one after another, stopping at the first failure.
    async fn collect_sequential(
        &self,
        variants: &[QueryVariant],
        input: &RunConsensusInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<String>, RunConsensusError> {
        let mut answers = Vec::with_capacity(variants.len());

        for (index, variant) in variants.iter().enumerate() {
            let call = call_variant(
                self.generator.as_ref(),
                index,
                variant,
                input.execution.call_timeout,
            );

            let result = match &input.cancellation {
                Some(token) => tokio::select! {
                    _ = token.cancelled() => return Err(RunConsensusError::Cancelled),
                    result = call => result,
                },
                None => call.await,
            };

            match result {
                Ok(answer) => {
                    progress.on_task_complete(&Phase::Consensus, label(variant), true);
                    answers.push(answer);
                }
                Err(e) => {
                    warn!("{}", e);
                    progress.on_task_complete(&Phase::Consensus, label(variant), false);
                    return Err(e);
                }
            }
        }

        Ok(answers)
    }
}

fn label(variant: &QueryVariant) -> &'static str {
    variant.template.as_str()
}

async fn call_variant(
    generator: &dyn AnswerGenerator,
    index: usize,
    variant: &QueryVariant,
    timeout: Option<Duration>,
) -> Result<String, RunConsensusError> {
    let call = generator.generate(variant.as_str());
    let result = match timeout {
        Some(after) => tokio::time::timeout(after, call).await.map_err(|_| {
            RunConsensusError::Timeout {
                index,
                variant: variant.to_string(),
                after,
            }
        })?,
        None => call.await,
    };

    result.map_err(|source| RunConsensusError::GenerationFailure {
        index,
        variant: variant.to_string(),
        source,
    })
}
