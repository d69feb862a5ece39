//! Execution parameters: use case control.
//!
//! [`ExecutionParams`] groups the static parameters that control how the
//! indexing, retrieval and consensus use cases run. These are
//! application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Execution control parameters.
///
/// | Field | Used by |
/// |-------|---------|
/// | `top_k` | RetrievalQa |
/// | `embedding_batch_size` | IndexDocument |
/// | `parallel`, `call_timeout` | RunConsensus |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Number of chunks placed in the answer prompt.
    pub top_k: usize,
    /// Chunks per embedding request.
    pub embedding_batch_size: usize,
    /// Issue the consensus calls concurrently instead of one after another.
    pub parallel: bool,
    /// Upper bound for each answer-generation call. `None` waits forever.
    pub call_timeout: Option<Duration>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            top_k: 4,
            embedding_batch_size: 64,
            parallel: true,
            call_timeout: None,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    pub fn with_embedding_batch_size(mut self, size: usize) -> Self {
        self.embedding_batch_size = size.max(1);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn sequential(self) -> Self {
        self.with_parallel(false)
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.top_k, 4);
        assert_eq!(params.embedding_batch_size, 64);
        assert!(params.parallel);
        assert!(params.call_timeout.is_none());
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_top_k(8)
            .sequential()
            .with_call_timeout(Some(Duration::from_secs(30)))
            .with_embedding_batch_size(0);

        assert_eq!(params.top_k, 8);
        assert!(!params.parallel);
        assert_eq!(params.call_timeout, Some(Duration::from_secs(30)));
        assert_eq!(params.embedding_batch_size, 1);
    }
}
