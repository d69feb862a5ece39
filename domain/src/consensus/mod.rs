//! Paraphrase consensus domain
//!
//! A question is asked four times in slightly different words and the answer
//! that comes back most often is taken as authoritative.
//!
//! ```text
//! Question ──paraphrase──► [v1, v2, v3, v4]
//!                              │   (answer generator, one call per variant)
//!                              ▼
//!                          [a1, a2, a3, a4] ──tally──► winner
//! ```
//!
//! Answers are compared by exact string equality. Ties go to the answer that
//! reached the winning count first, so four distinct answers select `a1`.

pub mod paraphrase;
pub mod result;
pub mod tally;

pub use paraphrase::{ParaphraseTemplate, QueryVariant, VARIANT_COUNT, paraphrase};
pub use result::{ConsensusResult, VariantAnswer};
pub use tally::AnswerTally;
